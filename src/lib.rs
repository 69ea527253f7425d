//! # kson
//!
//! A Serde-compatible library for KSON, a relaxed, indentation-free text
//! notation for records, lists and literals.
//!
//! ## What is KSON?
//!
//! KSON documents are built from three things:
//!
//! - **Literals**: raw text, one per line, interpreted only when bound
//! - **Lists**: `[` ... `]`, one item per line
//! - **Hashes**: `{` ... `}`, one `name: value` entry per line
//!
//! ```text
//! {
//!     Log_Level: debug
//!     Listen:    8000
//!     Roles: [
//!         {
//!             Name:  user
//!             Allow: [
//!                 /user
//!                 /order
//!             ]
//!         }
//!     ]
//!     Env: {
//!         auth: http://auth.io
//!         motd: "  padded, or [bracketed]  "
//!     }
//! }
//! ```
//!
//! Delimiters must end their line, literals need no quoting unless they
//! start with a delimiter or quote, carry surrounding whitespace or span
//! several lines. Indentation is free.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use kson::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "{\n\tid:123\n\tname:Alice\n\tactive:true\n}\n");
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ## Decoding and binding
//!
//! Reading a document happens in two steps that can also be used on their
//! own: [`decode`] turns text into a [`Node`] tree and fails only on
//! malformed text; [`from_node`] binds a tree into a typed value and is
//! lenient about content: literals are coerced on demand, missing fields take
//! their serde default or zero value, and field names match
//! case-insensitively when there is no exact match. [`bind`] and
//! [`unmarshal`] merge a document over an existing value instead.
//!
//! ```rust
//! use kson::{decode_str, from_node};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Limits { max_conn: u32, burst: [u8; 2] }
//!
//! let node = decode_str("{\n  MAX_CONN: 0x100\n  burst: [\n    1\n    2\n    3\n  ]\n}\n").unwrap();
//! let limits: Limits = from_node(&node).unwrap();
//! assert_eq!(limits.max_conn, 256);
//! assert_eq!(limits.burst, [1, 2]);
//! ```
//!
//! ## Building trees by hand
//!
//! ```rust
//! use kson::kson;
//!
//! let node = kson!({ "name": "Alice", "tags": ["rust", "serde"] });
//! assert_eq!(node.query("name").and_then(|n| n.as_str()), Some("Alice"));
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]: decoder frames at `trace`, completed
//! decodes and shape mismatches at `debug`, literals that failed to coerce
//! at `warn`. No subscriber is installed.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - encoding and decoding a record
//! - **`config_file.rs`** - loading a commented configuration file
//!
//! Run any example with: `cargo run --example <name>`

pub mod coerce;
pub mod de;
pub mod decode;
pub mod error;
pub mod load;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
mod scanner;
pub mod ser;

pub use coerce::FromLiteral;
pub use de::{bind, from_node, Deserializer};
pub use decode::{decode, decode_str, decode_with_options, Decoder};
pub use error::{Error, Result};
pub use load::{from_file, parse_file};
pub use map::NodeMap;
pub use node::{Node, NodeKind};
pub use options::{Indent, KsonOptions};
pub use ser::{to_node, NodeSerializer, Serializer};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a KSON string.
///
/// # Examples
///
/// ```rust
/// use kson::to_string;
///
/// let text = to_string(&vec!["a", "[b]"]).unwrap();
/// assert_eq!(text, "[\n\ta\n\t\"[b]\"\n]\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Encode`] if the value cannot be written as KSON: map keys
/// that are not scalars or would not decode back, strings that need quoting
/// but contain both quote characters, or nesting deeper than
/// [`ser::MAX_ENCODE_DEPTH`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, KsonOptions::default())
}

/// Serialize any `T: Serialize` to a KSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use kson::{to_string_with_options, Indent, KsonOptions};
///
/// let options = KsonOptions::new().with_indent(Indent::Spaces(4));
/// let text = to_string_with_options(&[1, 2], options).unwrap();
/// assert_eq!(text, "[\n    1\n    2\n]\n");
/// ```
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: KsonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    let mut text = serializer.into_inner();
    text.push('\n');
    Ok(text)
}

/// Serialize any `T: Serialize` to KSON bytes.
///
/// # Errors
///
/// As [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Serialize any `T: Serialize` to a writer in KSON format.
///
/// # Examples
///
/// ```rust
/// use kson::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &true).unwrap();
/// assert_eq!(buffer, b"true\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decodes `input` and binds it into an existing destination.
///
/// The document is merged over `dest` as [`bind`] describes: missing
/// entries keep their current values. `dest` is only written when both
/// steps succeed.
///
/// # Examples
///
/// ```rust
/// use kson::unmarshal;
/// use std::collections::HashMap;
///
/// let mut env: HashMap<String, String> = HashMap::new();
/// unmarshal(b"{\n  auth: http://auth.io\n  key:\n}\n", &mut env).unwrap();
/// assert_eq!(env["auth"], "http://auth.io");
/// assert_eq!(env["key"], "");
/// ```
///
/// # Errors
///
/// [`Error::Format`] for malformed input, otherwise as [`bind`].
pub fn unmarshal<T>(input: &[u8], dest: &mut T) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let node = decode(input)?;
    bind(&node, dest)
}

/// Deserialize an instance of type `T` from a string of KSON text.
///
/// # Examples
///
/// ```rust
/// use kson::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("{\n  x: 1\n  y: -2\n}").unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Format`] if the input is not valid KSON, with line and
/// column information, or a bind error as described in [`from_node`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let node = decode_str(s)?;
    from_node(&node)
}

/// Deserialize an instance of type `T` from bytes of KSON text.
///
/// # Errors
///
/// As [`from_str`], plus [`Error::Format`] for input that is not UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let node = decode(v)?;
    from_node(&node)
}

/// Deserialize an instance of type `T` from an I/O stream of KSON.
///
/// The whole stream is read before decoding starts.
///
/// # Examples
///
/// ```rust
/// use kson::from_reader;
/// use std::io::Cursor;
///
/// let ports: Vec<u16> = from_reader(Cursor::new(b"[\n  80\n  443\n]\n")).unwrap();
/// assert_eq!(ports, vec![80, 443]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`from_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}
