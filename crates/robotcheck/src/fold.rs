//! The group-assembly state machine.
//!
//! A [`GroupFolder`] walks a sequence of classified lines one group at a
//! time. Each call to [`GroupFolder::fold_group`] visits four phases in a
//! fixed order, consuming a maximal run of matching lines (and empty lines)
//! in each:
//!
//! 1. start-group lines, which open the user-agent context,
//! 2. allow/disallow rules for that context,
//! 3. crawl-delay lines for that context,
//! 4. sitemap lines, which close the context.
//!
//! The open user-agent context and whether a sitemap has been seen are
//! carried from one call to the next, so rules following a crawl-delay still
//! attach to the group above them.

use crate::directives::RuleSet;
use crate::error::{Error, SyntaxError};
use crate::grammar::{classify, ClassifiedLine, IdentifierClass};

/// One group's worth of directives, as folded by a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    /// The user-agents the rules apply to. Empty when no context is open.
    pub agents: Vec<String>,
    /// Rules and crawl-delay collected in this call.
    pub rules: RuleSet,
    /// Sitemap URIs collected in this call.
    pub sitemaps: Vec<String>,
}

/// Folds classified lines into [`Group`]s.
#[derive(Debug)]
pub struct GroupFolder<'a, S> {
    lines: &'a [S],
    classified: Vec<Result<ClassifiedLine, SyntaxError>>,
    ignore_unsupported: bool,
    context: Vec<String>,
    sitemap_seen: bool,
}

impl<'a, S: AsRef<str>> GroupFolder<'a, S> {
    /// Creates a folder over `lines`, classifying each one with identifiers
    /// checked against `class`.
    ///
    /// A classification error is only raised once the folder reaches that
    /// line, so an earlier failure is reported first.
    #[must_use]
    pub fn new(lines: &'a [S], class: IdentifierClass, ignore_unsupported: bool) -> Self {
        let classified = lines
            .iter()
            .map(|line| classify(line.as_ref(), class))
            .collect();
        Self {
            lines,
            classified,
            ignore_unsupported,
            context: Vec::new(),
            sitemap_seen: false,
        }
    }

    /// The number of lines being folded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if there are no lines to fold.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line(&self, index: usize) -> String {
        self.lines[index].as_ref().to_string()
    }

    fn class(&self, index: usize) -> Result<ClassifiedLine, Error> {
        self.classified[index]
            .clone()
            .map_err(|source| Error::Syntax {
                index,
                line: self.line(index),
                source,
            })
    }

    /// Fails in strict mode, otherwise logs the skipped line.
    fn skip_or_fail(&self, err: Error) -> Result<(), Error> {
        if self.ignore_unsupported {
            tracing::warn!("skipping unsupported line: {err}");
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Folds one group starting at `pos`, returning the position after it.
    ///
    /// The returned position is always greater than `pos` when `pos` is in
    /// bounds.
    ///
    /// # Errors
    ///
    /// - [`Error::Syntax`] if a line reached has a malformed directive value.
    /// - [`Error::PhaseOrder`] for a crawl-delay with no open user-agent or
    ///   after a sitemap line, unless unsupported lines are ignored.
    /// - [`Error::UnrecognizedLine`] if the line at `pos` starts no phase,
    ///   unless unsupported lines are ignored.
    pub fn fold_group(&mut self, mut pos: usize) -> Result<(usize, Group), Error> {
        let start = pos;
        let mut group = Group::default();

        // *(startgroupline / emptyline)
        let mut opened = false;
        while pos < self.len() {
            match self.class(pos)? {
                ClassifiedLine::StartGroup(agent) => {
                    if !opened {
                        self.context.clear();
                        opened = true;
                    }
                    if !self.context.iter().any(|open| open.eq_ignore_ascii_case(&agent)) {
                        self.context.push(agent);
                    }
                }
                ClassifiedLine::Empty => {}
                _ => break,
            }
            pos += 1;
        }
        group.agents.clone_from(&self.context);

        // *(rule / emptyline)
        while pos < self.len() {
            match self.class(pos)? {
                ClassifiedLine::Rule { kind, pattern } if !self.context.is_empty() => {
                    if let Some(pattern) = pattern {
                        group.rules.insert(kind, pattern);
                    }
                }
                ClassifiedLine::Empty => {}
                _ => break,
            }
            pos += 1;
        }

        // *(crawldelay / emptyline)
        while pos < self.len() {
            match self.class(pos)? {
                ClassifiedLine::CrawlDelay(delay) => {
                    if let Some(reason) = self.crawl_delay_violation() {
                        self.skip_or_fail(Error::PhaseOrder {
                            index: pos,
                            line: self.line(pos),
                            reason,
                        })?;
                    } else {
                        group.rules.crawl_delay = Some(delay);
                    }
                }
                ClassifiedLine::Empty => {}
                _ => break,
            }
            pos += 1;
        }

        // *(sitemap / emptyline)
        while pos < self.len() {
            match self.class(pos)? {
                ClassifiedLine::Sitemap(uri) => {
                    group.sitemaps.push(uri);
                    self.sitemap_seen = true;
                    self.context.clear();
                }
                ClassifiedLine::Empty => {}
                _ => break,
            }
            pos += 1;
        }

        if pos == start && pos < self.len() {
            self.skip_or_fail(Error::UnrecognizedLine {
                index: pos,
                line: self.line(pos),
            })?;
            pos += 1;
        }

        tracing::debug!(
            agents = ?group.agents,
            from = start,
            to = pos,
            "folded group"
        );
        Ok((pos, group))
    }

    fn crawl_delay_violation(&self) -> Option<&'static str> {
        if self.sitemap_seen {
            Some("crawl-delay after sitemap lines")
        } else if self.context.is_empty() {
            Some("crawl-delay without a preceding user-agent")
        } else {
            None
        }
    }
}
