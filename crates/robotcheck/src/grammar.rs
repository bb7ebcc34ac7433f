//! The robots.txt grammar and its line-level productions.
//!
//! The grammar follows [RFC 9309](https://datatracker.ietf.org/doc/html/rfc9309)
//! with a handful of documented extensions:
//!
//! ```text
//! robotstxt      = *(group / emptyline)
//! group          = *(startgroupline / emptyline)
//!                  *(rule / emptyline)
//!                  *(crawldelay / emptyline)
//!                  *(sitemap / emptyline)
//!
//! startgroupline = *WS "user-agent" *WS ":" *WS product-token EOL
//! rule           = *WS ("allow" / "disallow") *WS ":" *WS (path-pattern / empty-pattern) EOL
//! crawldelay     = *WS "crawl-delay" *WS ":" *WS float EOL
//! sitemap        = *WS "sitemap" *WS ":" *WS URI EOL
//!
//! product-token  = identifier ["*"] / "*"
//! path-pattern   = ("/" / "*") *UTF8-char-noctl
//! empty-pattern  = *WS
//! identifier     = 1*(%x2D / %x30-39 / %x41-5A / %x5F / %x61-7A)
//! comment        = "#" *(UTF8-char-noctl / WS / "#")
//! emptyline      = EOL
//! EOL            = *WS [comment] NL
//! WS             = %x20 / %x09
//! ```
//!
//! Deviations from the RFC: identifiers may carry a trailing `*` and contain
//! digits, a group may open with an empty line instead of a start-group line,
//! path patterns may start with `*`, and the nonstandard `crawl-delay` and
//! `sitemap` lines are recognized.
//!
//! Each production is hand-classified by the functions in [`lines`]; the
//! character-class checks live in [`tokens`].

pub mod lines;
pub mod tokens;

pub use lines::classify;
pub use tokens::IdentifierClass;

/// Whether a rule grants or withholds access to a path pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// An `allow:` line.
    Allow,
    /// A `disallow:` line.
    Disallow,
}

impl RuleKind {
    /// Returns the directive keyword as written in robots.txt (lowercase).
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            RuleKind::Allow => "allow",
            RuleKind::Disallow => "disallow",
        }
    }
}

/// The production a single line belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedLine {
    /// Whitespace and/or a comment only.
    Empty,
    /// A `user-agent:` line naming the agent it opens a group for.
    StartGroup(String),
    /// An `allow:` or `disallow:` line. A `None` pattern places no restriction.
    Rule {
        /// Allow or disallow.
        kind: RuleKind,
        /// The path pattern, absent for an empty pattern.
        pattern: Option<String>,
    },
    /// A nonstandard `crawl-delay:` line, in seconds.
    CrawlDelay(f64),
    /// A `sitemap:` line carrying its URI verbatim.
    Sitemap(String),
    /// None of the above.
    Invalid,
}

impl ClassifiedLine {
    /// Returns `true` for empty and comment-only lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, ClassifiedLine::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_keywords() {
        assert_eq!(RuleKind::Allow.keyword(), "allow");
        assert_eq!(RuleKind::Disallow.keyword(), "disallow");
    }

    #[test]
    fn test_classify_dispatch() {
        let class = IdentifierClass::Standard;
        assert!(classify("# only a comment", class).unwrap().is_empty());
        assert_eq!(
            classify("User-agent: *", class).unwrap(),
            ClassifiedLine::StartGroup("*".to_string())
        );
        assert_eq!(
            classify("Disallow: /private", class).unwrap(),
            ClassifiedLine::Rule {
                kind: RuleKind::Disallow,
                pattern: Some("/private".to_string()),
            }
        );
        assert_eq!(
            classify("Crawl-delay: 1.5", class).unwrap(),
            ClassifiedLine::CrawlDelay(1.5)
        );
        assert_eq!(
            classify("Sitemap: https://example.com/map.xml", class).unwrap(),
            ClassifiedLine::Sitemap("https://example.com/map.xml".to_string())
        );
        assert_eq!(classify("Host: example.com", class).unwrap(), ClassifiedLine::Invalid);
    }
}
