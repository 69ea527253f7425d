//! Error types for KSON decoding, binding and encoding.
//!
//! Errors fall into a small taxonomy:
//!
//! - **Format errors**: malformed input (unterminated container, delimiter not
//!   alone on its line, hash entry without `:`, mismatched close, empty
//!   document). Fatal to the decode call, carry the byte offset plus line and
//!   column.
//! - **Coercion errors**: a literal could not be parsed as the requested scalar.
//!   The binder logs and skips these; node accessors return them.
//! - **Bind errors**: the destination itself cannot accept the node tree.
//! - **Encode errors**: the value cannot be written as KSON text.
//!
//! ## Examples
//!
//! ```rust
//! use kson::{decode_str, Error};
//!
//! let err = decode_str("{ a: 1 ] }").unwrap_err();
//! assert!(err.is_format());
//! assert_eq!(err.offset(), Some(0));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while decoding, binding or
/// encoding KSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed KSON input
    #[error("Format error at line {line}, column {col} (offset {offset}): {msg}")]
    Format {
        line: usize,
        col: usize,
        offset: usize,
        msg: String,
    },

    /// A literal could not be converted to the requested scalar kind
    #[error("Cannot parse {literal:?} as {expected}")]
    Coercion {
        literal: String,
        expected: &'static str,
    },

    /// The destination cannot accept the node tree
    #[error("Bind error: {0}")]
    Bind(String),

    /// The value cannot be written as KSON
    #[error("Encode error: {0}")]
    Encode(String),

    /// A node accessor was used on the wrong kind of node
    #[error("Invalid node type: expected {expected}, found {found}")]
    InvalidNodeType {
        expected: &'static str,
        found: &'static str,
    },

    /// A named child does not exist
    #[error("{0} does not exist")]
    NotFound(String),

    /// A struct field has no entry and no serde default
    #[error("missing field `{0}`")]
    MissingField(&'static str),
}

impl Error {
    /// Creates a format error at `offset` within `input`, computing the
    /// 1-based line and column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kson::Error;
    ///
    /// let err = Error::format(b"{\n  a\n}", 4, "hash entry is missing ':'");
    /// assert!(err.to_string().contains("line 2, column 3"));
    /// ```
    pub fn format(input: &[u8], offset: usize, msg: &str) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let col = match before.iter().rposition(|&b| b == b'\n') {
            Some(nl) => offset - nl,
            None => offset + 1,
        };
        Error::Format {
            line,
            col,
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates a coercion error for a literal that is not a valid `expected`.
    pub fn coercion(literal: &str, expected: &'static str) -> Self {
        Error::Coercion {
            literal: literal.to_string(),
            expected,
        }
    }

    /// Creates a bind error.
    pub fn bind<T: fmt::Display>(msg: T) -> Self {
        Error::Bind(msg.to_string())
    }

    /// Creates an encode error.
    pub fn encode<T: fmt::Display>(msg: T) -> Self {
        Error::Encode(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for malformed-input errors.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }

    /// Returns `true` for literal coercion failures.
    #[must_use]
    pub fn is_coercion(&self) -> bool {
        matches!(self, Error::Coercion { .. })
    }

    /// Byte offset of a format error within the input.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Format { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Encode(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Bind(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        Error::MissingField(field)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
