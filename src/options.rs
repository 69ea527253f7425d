//! Configuration options for KSON encoding and decoding.
//!
//! - [`KsonOptions`]: main configuration struct
//! - [`Indent`]: what one nesting level of encoder output is indented with
//!
//! ## Examples
//!
//! ```rust
//! use kson::{to_string_with_options, Indent, KsonOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32 }
//!
//! let options = KsonOptions::new().with_indent(Indent::Spaces(2));
//! let text = to_string_with_options(&Data { x: 1 }, options).unwrap();
//! assert_eq!(text, "{\n  x:1\n}\n");
//! ```

/// Default maximum number of decoder frames, root frame included.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Indentation written by the encoder for each nesting level.
///
/// The decoder ignores indentation entirely, so this only affects how the
/// output looks.
///
/// # Examples
///
/// ```rust
/// use kson::Indent;
///
/// let mut out = String::new();
/// Indent::Tab.write_to(&mut out, 2);
/// assert_eq!(out, "\t\t");
///
/// out.clear();
/// Indent::Spaces(4).write_to(&mut out, 1);
/// assert_eq!(out, "    ");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(usize),
}

impl Indent {
    /// Appends `depth` levels of indentation to `out`.
    pub fn write_to(&self, out: &mut String, depth: usize) {
        match self {
            Indent::Tab => out.extend(std::iter::repeat('\t').take(depth)),
            Indent::Spaces(n) => out.extend(std::iter::repeat(' ').take(depth * n)),
        }
    }
}

/// Configuration options for KSON encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use kson::{Indent, KsonOptions};
///
/// let options = KsonOptions::new();
/// assert_eq!(options.indent, Indent::Tab);
/// assert_eq!(options.max_depth, 16);
///
/// let options = KsonOptions::new()
///     .with_indent(Indent::Spaces(4))
///     .with_max_depth(64);
/// assert_eq!(options.max_depth, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KsonOptions {
    pub indent: Indent,
    pub max_depth: usize,
}

impl Default for KsonOptions {
    fn default() -> Self {
        KsonOptions {
            indent: Indent::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl KsonOptions {
    /// Creates default options (tab indentation, 16 decoder frames).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation used by the encoder.
    #[must_use]
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the maximum decoder nesting, counted in frames.
    ///
    /// Every container and every list/hash entry takes one frame, and the
    /// document root takes one more. Values below 2 are raised to 2 so that a
    /// single top-level container can still be read.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(2);
        self
    }
}
