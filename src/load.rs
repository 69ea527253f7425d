//! Loading KSON configuration files.
//!
//! A configuration file is the body of a hash without the surrounding
//! braces, and may contain comment lines:
//!
//! ```text
//! # service settings
//! name: api
//! listen: {
//!     port: 8080
//! }
//! ```
//!
//! A comment line is any line whose first non-whitespace character is `#`.
//! Comments are removed line by line before decoding, so a `#` line inside a
//! multi-line quoted literal is removed as well.

use crate::{decode_str, from_node, Error, Node, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Removes comment lines from `text`.
///
/// ```rust
/// use kson::load::strip_comments;
///
/// assert_eq!(strip_comments("# c\na: 1\n  # c\nb: 2\n"), "a: 1\nb: 2\n");
/// ```
pub fn strip_comments(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect()
}

/// Strips comments from `text` and wraps what is left in an implicit
/// top-level hash.
///
/// ```rust
/// use kson::load::wrap_document;
///
/// assert_eq!(wrap_document("a: 1\n"), "{\na: 1\n\n}\n");
/// ```
pub fn wrap_document(text: &str) -> String {
    let body = strip_comments(text);
    let mut doc = String::with_capacity(body.len() + 6);
    doc.push_str("{\n");
    doc.push_str(&body);
    doc.push_str("\n}\n");
    doc
}

/// Reads and decodes a configuration file.
///
/// # Errors
///
/// [`Error::Io`] when the file cannot be read, [`Error::Format`] when its
/// content is not a valid hash body.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::io(&format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = text.len(), "loading kson file");
    decode_str(&wrap_document(&text))
}

/// Reads a configuration file and binds it into a new `T`.
///
/// # Errors
///
/// As [`parse_file`], plus the bind errors of [`crate::from_node`].
pub fn from_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let node = parse_file(path)?;
    from_node(&node)
}
