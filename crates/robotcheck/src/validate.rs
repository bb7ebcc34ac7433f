//! Whole-document validation and parsing.
//!
//! [`parse_lines`] drives the [`GroupFolder`](crate::fold::GroupFolder) across
//! the full line sequence, merging each folded group into a single
//! [`DirectiveMap`]. It stops at the first fatal error; there is no partial
//! result on failure.

use crate::directives::DirectiveMap;
use crate::error::Error;
use crate::fold::{Group, GroupFolder};
use crate::grammar::IdentifierClass;
use crate::load::lines_from_str;

/// Settings recognized by the parser.
///
/// The default is strict: every unsupported or misplaced line is fatal and
/// identifiers use the standard character class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip crawl-delay lines that break phase order and lines matching no
    /// production instead of failing. Malformed directive values stay fatal.
    pub ignore_unsupported: bool,

    /// The character class user-agent identifiers are checked against.
    pub identifiers: IdentifierClass,
}

impl ParseOptions {
    /// Strict parsing with standard identifiers.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient parsing with standard identifiers.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            ignore_unsupported: true,
            ..Self::default()
        }
    }

    /// Returns a copy using the given identifier class.
    #[must_use]
    pub fn with_identifiers(self, identifiers: IdentifierClass) -> Self {
        Self {
            identifiers,
            ..self
        }
    }
}

fn merge(map: &mut DirectiveMap, group: Group) {
    for agent in &group.agents {
        map.merge_group(agent, &group.rules);
    }
    for uri in group.sitemaps {
        map.add_sitemap(uri);
    }
}

/// Parses a sequence of lines into a [`DirectiveMap`].
///
/// Lines are expected to be trimmed, with blank lines already dropped (see
/// [`load`](crate::load::load)), though neither is required. A user-agent
/// declared in several groups accumulates the rules of all of them.
///
/// # Errors
///
/// Returns the first [`Error::Syntax`], [`Error::PhaseOrder`] or
/// [`Error::UnrecognizedLine`] encountered. The latter two are skipped when
/// [`ParseOptions::ignore_unsupported`] is set.
pub fn parse_lines<S: AsRef<str>>(
    lines: &[S],
    options: &ParseOptions,
) -> Result<DirectiveMap, Error> {
    let mut folder = GroupFolder::new(lines, options.identifiers, options.ignore_unsupported);

    let mut map = DirectiveMap::default();
    let mut pos = 0;
    while pos < folder.len() {
        let (next, group) = folder.fold_group(pos)?;
        merge(&mut map, group);
        pos = next;
    }

    tracing::debug!(
        lines = lines.len(),
        agents = map.groups.len(),
        sitemaps = map.sitemaps.len(),
        "parsed robots.txt"
    );
    Ok(map)
}

/// Parses robots.txt text held in memory.
///
/// # Errors
///
/// See [`parse_lines`].
pub fn parse_str(text: &str, options: &ParseOptions) -> Result<DirectiveMap, Error> {
    parse_lines(&lines_from_str(text), options)
}

/// Returns `true` if the lines form a legal robots.txt file.
///
/// The reason for rejection is logged at debug level.
#[must_use]
pub fn is_valid<S: AsRef<str>>(lines: &[S], options: &ParseOptions) -> bool {
    match parse_lines(lines, options) {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!("invalid robots.txt: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::RuleKind;

    #[test]
    fn test_parse_groups_and_sitemaps() {
        let text = "
User-agent: googlebot
User-agent: bingbot
Disallow: /private
Allow: /private/public
Crawl-delay: 2

User-agent: *
Disallow: /

Sitemap: https://example.com/sitemap.xml
Sitemap: https://example.com/news.xml
";
        let map = parse_str(text, &ParseOptions::strict()).unwrap();
        assert_eq!(map.agents().collect::<Vec<_>>(), ["*", "bingbot", "googlebot"]);

        for agent in ["googlebot", "bingbot"] {
            let rules = map.group(agent).unwrap();
            assert_eq!(rules.patterns(RuleKind::Disallow), ["/private"]);
            assert_eq!(rules.patterns(RuleKind::Allow), ["/private/public"]);
            assert_eq!(rules.crawl_delay, Some(2.0));
        }
        assert_eq!(map.group("*").unwrap().disallow, ["/"]);
        assert_eq!(map.group("*").unwrap().crawl_delay, None);
        assert_eq!(
            map.sitemaps,
            ["https://example.com/news.xml", "https://example.com/sitemap.xml"]
        );
    }

    #[test]
    fn test_repeated_agent_merges() {
        let lines = [
            "User-agent: bot",
            "Disallow: /a",
            "User-agent: other",
            "Disallow: /b",
            "User-agent: bot",
            "Disallow: /c",
            "Crawl-delay: 3",
        ];
        let map = parse_lines(&lines, &ParseOptions::strict()).unwrap();
        let bot = map.group("bot").unwrap();
        assert_eq!(bot.disallow, ["/a", "/c"]);
        assert_eq!(bot.crawl_delay, Some(3.0));
        assert_eq!(map.group("other").unwrap().disallow, ["/b"]);
    }

    #[test]
    fn test_later_crawl_delay_wins() {
        let lines = ["User-agent: bot", "Crawl-delay: 1", "Disallow: /a", "Crawl-delay: 4"];
        let map = parse_lines(&lines, &ParseOptions::strict()).unwrap();
        assert_eq!(map.group("bot").unwrap().crawl_delay, Some(4.0));
    }

    #[test]
    fn test_agent_without_rules_is_recorded() {
        let map = parse_lines(&["User-agent: lonely"], &ParseOptions::strict()).unwrap();
        assert!(map.group("lonely").is_some_and(crate::RuleSet::is_empty));
    }

    #[test]
    fn test_start_group_after_sitemap_reopens_context() {
        let lines = [
            "Sitemap: https://example.com/s.xml",
            "User-agent: *",
            "Disallow: /tmp",
        ];
        let map = parse_lines(&lines, &ParseOptions::strict()).unwrap();
        assert_eq!(map.group("*").unwrap().disallow, ["/tmp"]);
        assert_eq!(map.sitemaps, ["https://example.com/s.xml"]);
    }

    #[test]
    fn test_unrecognized_line_strict_and_lenient() {
        let lines = ["User-agent: *", "Host: example.com", "Disallow: /x"];
        let err = parse_lines(&lines, &ParseOptions::strict()).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedLine { index: 1, .. }), "{err}");
        assert!(!is_valid(&lines, &ParseOptions::strict()));

        let map = parse_lines(&lines, &ParseOptions::lenient()).unwrap();
        assert_eq!(map.group("*").unwrap().disallow, ["/x"]);
    }

    #[test]
    fn test_syntax_error_is_fatal_even_when_lenient() {
        let lines = ["User-agent: bad/agent", "Disallow: /"];
        let err = parse_lines(&lines, &ParseOptions::lenient()).unwrap_err();
        assert!(matches!(err, Error::Syntax { index: 0, .. }), "{err}");
    }

    #[test]
    fn test_legacy_identifiers_option() {
        let lines = ["User-agent: Mozilla/5.0", "Disallow: /"];
        assert!(!is_valid(&lines, &ParseOptions::strict()));

        let options = ParseOptions::strict().with_identifiers(IdentifierClass::Legacy);
        let map = parse_lines(&lines, &options).unwrap();
        assert!(map.group("Mozilla/5.0").is_some());
    }

    #[test]
    fn test_empty_input_is_valid() {
        let lines: [&str; 0] = [];
        assert_eq!(parse_lines(&lines, &ParseOptions::strict()).unwrap(), DirectiveMap::default());
    }
}
