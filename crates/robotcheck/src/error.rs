//! Error taxonomy for reading and parsing robots.txt files.
//!
//! Classification predicates fail closed: a line that is simply "not this
//! production" yields no match rather than an error. Only content that is
//! malformed *inside* a recognized production surfaces as a [`SyntaxError`],
//! and only the folder and assembler turn line-level problems into a fatal
//! [`Error`].

use std::path::PathBuf;

/// A malformed value inside an otherwise recognized directive.
///
/// Produced by the line classifier, e.g. for `User-agent:` with no valid
/// product-token or `Crawl-delay:` with a non-numeric value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} but found {found:?}")]
pub struct SyntaxError {
    /// A short description of the shape the directive value must have.
    pub expected: &'static str,
    /// The offending text, or an empty string when the value was missing.
    pub found: String,
}

impl SyntaxError {
    pub(crate) fn new(expected: &'static str, found: impl Into<String>) -> Self {
        Self {
            expected,
            found: found.into(),
        }
    }
}

/// Fatal errors raised while loading or parsing a robots.txt file.
///
/// `index` is the zero-based position of the offending line in the line
/// sequence handed to the parser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A recognized directive carries a malformed value. Never skipped.
    #[error("syntax error at position {index} ({line:?}): {source}")]
    Syntax {
        /// Position of the line in the input sequence.
        index: usize,
        /// The offending line.
        line: String,
        /// What was expected and what was found.
        source: SyntaxError,
    },

    /// A well-formed directive appears where the grammar forbids it.
    #[error("directive out of order at position {index} ({line:?}): {reason}")]
    PhaseOrder {
        /// Position of the line in the input sequence.
        index: usize,
        /// The offending line.
        line: String,
        /// Why the line cannot be attached at this position.
        reason: &'static str,
    },

    /// A line matches none of the grammar's productions.
    #[error("unrecognized line at position {index}: {line:?}")]
    UnrecognizedLine {
        /// Position of the line in the input sequence.
        index: usize,
        /// The offending line.
        line: String,
    },

    /// The input path does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The input is not valid UTF-8.
    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Encoding {
        /// The path being read.
        path: PathBuf,
        /// The underlying decoding failure.
        source: std::string::FromUtf8Error,
    },
}

impl Error {
    /// Returns `true` if the error describes an illegal document rather than
    /// a failure to read one.
    #[must_use]
    pub fn is_grammar_violation(&self) -> bool {
        matches!(
            self,
            Error::Syntax { .. } | Error::PhaseOrder { .. } | Error::UnrecognizedLine { .. }
        )
    }

    /// Returns the position of the offending line, if the error refers to one.
    #[must_use]
    pub fn line_index(&self) -> Option<usize> {
        match self {
            Error::Syntax { index, .. }
            | Error::PhaseOrder { index, .. }
            | Error::UnrecognizedLine { index, .. } => Some(*index),
            Error::NotFound(_) | Error::Io { .. } | Error::Encoding { .. } => None,
        }
    }
}
