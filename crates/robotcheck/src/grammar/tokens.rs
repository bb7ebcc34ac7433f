//! Token-level validators and the shared whitespace tokenizer.
//!
//! Every line classifier splits its input with [`tokenize`] and then checks
//! individual tokens against the character classes defined here.

/// Returns `true` for the grammar's `WS` characters (space and horizontal tab).
#[must_use]
pub fn is_ws(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// A lazy sequence of whitespace-delimited tokens on one line.
///
/// Iteration ends at the end of the line or at the first token that begins
/// with `#`, since everything from there on is a trailing comment. The
/// iterator is cheap to clone, so a classifier can restart from any point.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Splits `line` into [`Tokens`].
#[must_use]
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens { rest: line }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start_matches(is_ws);
        if trimmed.is_empty() || trimmed.starts_with('#') {
            self.rest = "";
            return None;
        }
        let end = trimmed.find(is_ws).unwrap_or(trimmed.len());
        let (token, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(token)
    }
}

/// The character class accepted inside identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierClass {
    /// `[-A-Za-z0-9_]`, as in RFC 9309 plus digits.
    #[default]
    Standard,
    /// The standard class widened with space, `.`, `/` and `\` for legacy
    /// user-agent strings such as `Mozilla/5.0`.
    Legacy,
}

impl IdentifierClass {
    fn admits(self, c: char) -> bool {
        let standard = c.is_ascii_alphanumeric() || c == '-' || c == '_';
        match self {
            IdentifierClass::Standard => standard,
            IdentifierClass::Legacy => standard || matches!(c, ' ' | '.' | '/' | '\\'),
        }
    }
}

/// Matches one or more identifier characters, optionally followed by a single
/// trailing `*`.
///
/// Returns the matched token, or `None` if any character before the optional
/// `*` falls outside `class`.
#[must_use]
pub fn is_identifier(token: &str, class: IdentifierClass) -> Option<&str> {
    let body = token.strip_suffix('*').unwrap_or(token);
    if !body.is_empty() && body.chars().all(|c| class.admits(c)) {
        Some(token)
    } else {
        None
    }
}

/// Returns `true` if `token` is the bare wildcard `*` or an identifier.
#[must_use]
pub fn is_product_token(token: &str, class: IdentifierClass) -> bool {
    token == "*" || is_identifier(token, class).is_some()
}

/// Returns `true` if `token` is a path pattern.
///
/// A path pattern starts with `/` (or `*`) and contains no ASCII control
/// characters (`0x00`-`0x1F` and `0x7F`) after its first character.
#[must_use]
pub fn is_path_pattern(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some('/' | '*') => chars.all(|c| c >= '\u{20}' && c != '\u{7f}'),
        _ => false,
    }
}
