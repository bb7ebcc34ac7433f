//! Line classification.
//!
//! Each `match_*` function recognizes one production. They return `Ok(None)`
//! (or `None`) when the line belongs to some other production, and a
//! [`SyntaxError`] only when the directive keyword is present but the value
//! that follows it is malformed.

use super::tokens::{is_path_pattern, is_product_token, is_ws, tokenize, IdentifierClass};
use super::{ClassifiedLine, RuleKind};
use crate::error::SyntaxError;

const PRODUCT_TOKEN: &str = "a product-token matching [-A-Za-z0-9_]+ with an optional trailing '*', or '*'";
const LEGACY_PRODUCT_TOKEN: &str = "a product-token matching [-A-Za-z0-9_ ./\\]+ with an optional trailing '*', or '*'";
const DELAY: &str = "a non-negative number of seconds";
const URI: &str = "a single sitemap URI";

/// Returns `true` if the line holds nothing but whitespace and an optional
/// comment.
#[must_use]
pub fn is_empty_line(line: &str) -> bool {
    for c in line.chars() {
        if c == '#' {
            return true;
        }
        if !is_ws(c) {
            return false;
        }
    }
    true
}

/// Strips `*WS keyword *WS ":"` from the front of `line`, comparing the
/// keyword ASCII case-insensitively, and returns what follows the colon.
fn directive_value<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let line = line.trim_start_matches(is_ws);
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    line[keyword.len()..]
        .trim_start_matches(is_ws)
        .strip_prefix(':')
}

/// Recognizes `user-agent: product-token`.
///
/// With [`IdentifierClass::Standard`] exactly one product-token must follow
/// the colon. With [`IdentifierClass::Legacy`] all tokens up to the comment
/// are joined by single spaces and validated as one identifier.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the `user-agent` keyword is present but is
/// not followed by a valid product-token.
pub fn match_start_group(
    line: &str,
    class: IdentifierClass,
) -> Result<Option<String>, SyntaxError> {
    let Some(value) = directive_value(line, "user-agent") else {
        return Ok(None);
    };
    let mut tokens = tokenize(value);

    match class {
        IdentifierClass::Standard => {
            let token = tokens
                .next()
                .ok_or_else(|| SyntaxError::new(PRODUCT_TOKEN, ""))?;
            if !is_product_token(token, class) {
                return Err(SyntaxError::new(PRODUCT_TOKEN, token));
            }
            if let Some(extra) = tokens.next() {
                return Err(SyntaxError::new("a single product-token", extra));
            }
            Ok(Some(token.to_string()))
        }
        IdentifierClass::Legacy => {
            let joined = tokens.collect::<Vec<_>>().join(" ");
            if is_product_token(&joined, class) {
                Ok(Some(joined))
            } else {
                Err(SyntaxError::new(LEGACY_PRODUCT_TOKEN, joined))
            }
        }
    }
}

/// Recognizes `allow: path-pattern` and `disallow: path-pattern`, including
/// the empty pattern.
///
/// Returns the rule kind and the pattern, which is `None` for an empty
/// pattern. A value that is not a single path pattern is not a rule.
#[must_use]
pub fn match_rule(line: &str) -> Option<(RuleKind, Option<String>)> {
    let (kind, value) = if let Some(value) = directive_value(line, "allow") {
        (RuleKind::Allow, value)
    } else if let Some(value) = directive_value(line, "disallow") {
        (RuleKind::Disallow, value)
    } else {
        return None;
    };

    let mut tokens = tokenize(value);
    match (tokens.next(), tokens.next()) {
        (None, _) => Some((kind, None)),
        (Some(pattern), None) if is_path_pattern(pattern) => {
            Some((kind, Some(pattern.to_string())))
        }
        _ => None,
    }
}

/// Recognizes the nonstandard `crawl-delay: seconds` line.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the `crawl-delay` keyword is present but the
/// value is missing, is not a single float, or is negative or non-finite.
pub fn match_crawl_delay(line: &str) -> Result<Option<f64>, SyntaxError> {
    let Some(value) = directive_value(line, "crawl-delay") else {
        return Ok(None);
    };
    let mut tokens = tokenize(value);
    let token = tokens.next().ok_or_else(|| SyntaxError::new(DELAY, ""))?;
    if let Some(extra) = tokens.next() {
        return Err(SyntaxError::new(DELAY, extra));
    }

    let delay: f64 = token.parse().map_err(|_| SyntaxError::new(DELAY, token))?;
    if !delay.is_finite() || delay < 0.0 {
        return Err(SyntaxError::new(DELAY, token));
    }
    Ok(Some(delay))
}

/// Recognizes `sitemap: URI`, returning the URI verbatim.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the `sitemap` keyword is present but is not
/// followed by exactly one URI.
pub fn match_sitemap(line: &str) -> Result<Option<String>, SyntaxError> {
    let Some(value) = directive_value(line, "sitemap") else {
        return Ok(None);
    };
    let mut tokens = tokenize(value);
    let uri = tokens.next().ok_or_else(|| SyntaxError::new(URI, ""))?;
    if let Some(extra) = tokens.next() {
        return Err(SyntaxError::new(URI, extra));
    }
    Ok(Some(uri.to_string()))
}

/// Classifies a line into the production it belongs to.
///
/// Productions are tried in the order empty line, start-group line, rule,
/// crawl-delay, sitemap. A line matching none of them is
/// [`ClassifiedLine::Invalid`].
///
/// # Errors
///
/// Propagates the [`SyntaxError`] of the first production whose keyword
/// matched but whose value is malformed.
pub fn classify(line: &str, class: IdentifierClass) -> Result<ClassifiedLine, SyntaxError> {
    if is_empty_line(line) {
        return Ok(ClassifiedLine::Empty);
    }
    if let Some(agent) = match_start_group(line, class)? {
        return Ok(ClassifiedLine::StartGroup(agent));
    }
    if let Some((kind, pattern)) = match_rule(line) {
        return Ok(ClassifiedLine::Rule { kind, pattern });
    }
    if let Some(delay) = match_crawl_delay(line)? {
        return Ok(ClassifiedLine::CrawlDelay(delay));
    }
    if let Some(uri) = match_sitemap(line)? {
        return Ok(ClassifiedLine::Sitemap(uri));
    }
    Ok(ClassifiedLine::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD: IdentifierClass = IdentifierClass::Standard;

    #[test]
    fn test_empty_lines() {
        for line in ["", "   ", "\t", "# comment", "   # indented comment", "#"] {
            assert!(is_empty_line(line), "{line:?}");
        }
        for line in ["a", "  x # comment", "User-agent: *"] {
            assert!(!is_empty_line(line), "{line:?}");
        }
    }

    #[test]
    fn test_start_group_spellings() {
        for line in [
            "User-agent: *",
            "user-agent:*",
            "USER-AGENT : *",
            "User-agent\t:\t*",
            "  User-agent: *   # everyone",
        ] {
            assert_eq!(
                match_start_group(line, STANDARD),
                Ok(Some("*".to_string())),
                "{line:?}"
            );
        }
        assert_eq!(
            match_start_group("User-agent: asia*", STANDARD),
            Ok(Some("asia*".to_string()))
        );
    }

    #[test]
    fn test_start_group_not_matching() {
        assert_eq!(match_start_group("Disallow: /", STANDARD), Ok(None));
        assert_eq!(match_start_group("User-agents: bot", STANDARD), Ok(None));
        assert_eq!(match_start_group("User-agent bot", STANDARD), Ok(None));
    }

    #[test]
    fn test_start_group_malformed_is_syntax_error() {
        let err = match_start_group("User-agent:", STANDARD).unwrap_err();
        assert_eq!(err.found, "");

        let err = match_start_group("User-agent: bot/1.0", STANDARD).unwrap_err();
        assert_eq!(err.found, "bot/1.0");

        let err = match_start_group("User-agent: bot crawler", STANDARD).unwrap_err();
        assert_eq!(err.found, "crawler");
    }

    #[test]
    fn test_start_group_legacy_joins_tokens() {
        let class = IdentifierClass::Legacy;
        assert_eq!(
            match_start_group("User-agent: Mozilla/5.0   compatible", class),
            Ok(Some("Mozilla/5.0 compatible".to_string()))
        );
        assert_eq!(match_start_group("User-agent: *", class), Ok(Some("*".to_string())));
        assert!(match_start_group("User-agent: bot(1)", class).is_err());
        assert!(match_start_group("User-agent:", class).is_err());
    }

    #[test]
    fn test_rules() {
        assert_eq!(
            match_rule("Disallow: /private"),
            Some((RuleKind::Disallow, Some("/private".to_string())))
        );
        assert_eq!(
            match_rule("allow:/"),
            Some((RuleKind::Allow, Some("/".to_string())))
        );
        assert_eq!(
            match_rule("Disallow : *.pdf # documents"),
            Some((RuleKind::Disallow, Some("*.pdf".to_string())))
        );
        assert_eq!(match_rule("Disallow:"), Some((RuleKind::Disallow, None)));
        assert_eq!(match_rule("Allow:   # nothing"), Some((RuleKind::Allow, None)));
    }

    #[test]
    fn test_rules_not_matching() {
        assert_eq!(match_rule("Disallow: private"), None);
        assert_eq!(match_rule("Disallow: /a /b"), None);
        assert_eq!(match_rule("Disallow /a"), None);
        assert_eq!(match_rule("Allowed: /a"), None);
        assert_eq!(match_rule("User-agent: *"), None);
    }

    #[test]
    fn test_crawl_delay() {
        assert_eq!(match_crawl_delay("Crawl-delay: 1.5"), Ok(Some(1.5)));
        assert_eq!(match_crawl_delay("crawl-delay:10"), Ok(Some(10.0)));
        assert_eq!(match_crawl_delay("Crawl-delay : 0 # none"), Ok(Some(0.0)));
        assert_eq!(match_crawl_delay("Disallow: /"), Ok(None));
    }

    #[test]
    fn test_crawl_delay_malformed_is_syntax_error() {
        for line in [
            "Crawl-delay:",
            "Crawl-delay: soon",
            "Crawl-delay: 1 2",
            "Crawl-delay: -1",
            "Crawl-delay: NaN",
            "Crawl-delay: inf",
        ] {
            assert!(match_crawl_delay(line).is_err(), "{line:?}");
        }
    }

    #[test]
    fn test_sitemap() {
        assert_eq!(
            match_sitemap("Sitemap: https://example.com/map.xml"),
            Ok(Some("https://example.com/map.xml".to_string()))
        );
        assert_eq!(
            match_sitemap("SITEMAP:https://example.com/a.xml # primary"),
            Ok(Some("https://example.com/a.xml".to_string()))
        );
        assert_eq!(match_sitemap("Site-map: x"), Ok(None));
        assert!(match_sitemap("Sitemap:").is_err());
        assert!(match_sitemap("Sitemap: a b").is_err());
    }

    #[test]
    fn test_classify_propagates_syntax_errors() {
        assert!(classify("User-agent: ???", STANDARD).is_err());
        assert!(classify("Crawl-delay: x", STANDARD).is_err());
        assert_eq!(classify("Disallow: nope", STANDARD), Ok(ClassifiedLine::Invalid));
    }

    #[test]
    fn test_keyword_with_multibyte_prefix() {
        assert_eq!(classify("ü", STANDARD), Ok(ClassifiedLine::Invalid));
        assert_eq!(classify("Allöw: /", STANDARD), Ok(ClassifiedLine::Invalid));
    }
}
