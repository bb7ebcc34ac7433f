//! Reading robots.txt files into the line sequence the parser consumes.

use crate::error::Error;
use std::path::Path;

/// Splits text into trimmed, non-blank lines.
///
/// Accepts `\n`, `\r\n` and bare `\r` line endings and drops a leading
/// byte-order mark.
#[must_use]
pub fn lines_from_str(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the file at `path` into trimmed, non-blank lines.
///
/// # Errors
///
/// - [`Error::NotFound`] if `path` is not an existing file.
/// - [`Error::Io`] if the file cannot be read.
/// - [`Error::Encoding`] if the contents are not valid UTF-8.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<String>, Error> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| Error::Encoding {
        path: path.to_path_buf(),
        source,
    })?;

    let lines = lines_from_str(&text);
    tracing::debug!(path = %path.display(), lines = lines.len(), "loaded robots.txt");
    Ok(lines)
}
