//! A validating parser for robots.txt files.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// The structured result of a parse.
///
/// A [`DirectiveMap`] is the only thing callers keep once parsing is done:
/// per-agent allow/disallow sets, crawl-delays and the global sitemap set.
pub mod directives;

/// Errors raised while reading or parsing a robots.txt file.
pub mod error;

/// The group-assembly state machine.
///
/// Folds the flat sequence of classified lines into groups, enforcing the
/// order start-group lines, rules, crawl-delay, sitemaps.
pub mod fold;

/// The robots.txt grammar: line classification and token validators.
///
/// Everything here is a pure function of a single line or token.
pub mod grammar;

/// Reading files into the trimmed line sequence the parser consumes.
pub mod load;

/// Whole-document parsing and validation.
pub mod validate;

pub use directives::{DirectiveMap, RuleSet};
pub use error::{Error, SyntaxError};
pub use grammar::{ClassifiedLine, IdentifierClass, RuleKind};
pub use load::{lines_from_str, load};
pub use validate::{is_valid, parse_lines, parse_str, ParseOptions};
