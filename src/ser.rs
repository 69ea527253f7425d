//! KSON encoding: typed values to text.
//!
//! [`Serializer`] writes KSON text directly while walking a value; it builds
//! no intermediate tree. [`NodeSerializer`] walks the same way but produces a
//! [`Node`] tree instead, with identical scalar text.
//!
//! ## Output shape
//!
//! - structs and maps: `{`, one `name:value` line per entry, `}`
//! - sequences, tuples and arrays: `[`, one element per line, `]`
//! - enums: unit variants as their name, every other variant as a
//!   one-entry hash `{ Variant: payload }`
//! - `None` and unit: a single space after a hash entry's colon, `""` as a
//!   list element or the whole document; both decode as an empty literal
//!
//! An empty string is written the same way as `None`, so `Some("")` and
//! `""` read back as `None` when the destination is an `Option`.
//!
//! Each nesting level is indented with [`KsonOptions::indent`]; the decoder
//! ignores indentation, so it is purely cosmetic.
//!
//! ```rust
//! use kson::{Indent, KsonOptions, Serializer};
//! use serde::Serialize;
//!
//! let mut serializer = Serializer::new(KsonOptions::new().with_indent(Indent::Spaces(1)));
//! vec![("a", 1)].serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), "[\n [\n  a\n  1\n ]\n]");
//! ```
//!
//! ## Literal quoting
//!
//! Strings must be quoted when bare text would not decode back to the same
//! string: when they start with a delimiter, a quote character or
//! whitespace, end with whitespace, or contain a line break. Such strings
//! are wrapped in `"`, or in `` ` `` when they contain `"` themselves.
//! Strings containing `"` but no `` ` `` are always wrapped in `` ` ``.
//! There is no escaping: a string that must be quoted and contains both
//! quote characters is an [`Error::Encode`].

use crate::{Error, KsonOptions, Node, NodeMap, Result};
use serde::{ser, Serialize};

/// Maximum container nesting the encoders accept.
pub const MAX_ENCODE_DEPTH: usize = 512;

/// Returns the quote character `s` is wrapped in, `None` when it is
/// written bare.
///
/// # Errors
///
/// [`Error::Encode`] when `s` needs quoting but contains both `"` and `` ` ``.
fn quote_for(s: &str) -> Result<Option<char>> {
    let needs_quotes = s.starts_with(['[', ']', '{', '}', '`', '"'])
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.contains(['\r', '\n']);
    match (needs_quotes, s.contains('"'), s.contains('`')) {
        (true, false, _) => Ok(Some('"')),
        (_, true, false) => Ok(Some('`')),
        (true, true, true) => Err(Error::encode(format!(
            "literal {s:?} contains both quote characters"
        ))),
        (false, _, _) => Ok(None),
    }
}

/// Checks that `key` decodes back as the same hash entry name.
fn check_key(key: &str) -> Result<()> {
    let problem = if key.is_empty() {
        "is empty"
    } else if key.contains(':') {
        "contains ':'"
    } else if key.contains(['\r', '\n']) {
        "contains a line break"
    } else if key.starts_with('}') {
        "starts with '}'"
    } else if key.trim() != key {
        "has surrounding whitespace"
    } else {
        return Ok(());
    };
    Err(Error::encode(format!("hash key {key:?} {problem}")))
}

/// The KSON text serializer.
///
/// Composite values are written without a trailing newline;
/// [`crate::to_string`] adds the final one.
pub struct Serializer {
    output: String,
    options: KsonOptions,
    depth: usize,
    /// Set while the value being written is a sequence element.
    element: bool,
}

impl Serializer {
    pub fn new(options: KsonOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            depth: 0,
            element: false,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn indent(&mut self) {
        self.options.indent.write_to(&mut self.output, self.depth);
    }

    fn open(&mut self, delim: char) -> Result<()> {
        self.element = false;
        if self.depth >= MAX_ENCODE_DEPTH {
            return Err(Error::encode("nesting is too deep"));
        }
        self.output.push(delim);
        self.output.push('\n');
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, delim: char) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.output.push(delim);
    }

    fn write_name(&mut self, name: &str) -> Result<()> {
        check_key(name)?;
        self.indent();
        self.output.push_str(name);
        self.output.push(':');
        Ok(())
    }

    /// Opens the `{ Variant: payload }` wrapper of a non-unit variant.
    fn open_variant(&mut self, variant: &str) -> Result<()> {
        self.open('{')?;
        self.write_name(variant)
    }

    fn close_variant(&mut self) {
        self.output.push('\n');
        self.close('}');
    }

    fn write_scalar(&mut self, text: &str) {
        self.element = false;
        self.output.push_str(text);
    }

    fn write_text(&mut self, s: &str) -> Result<()> {
        let element = std::mem::take(&mut self.element);
        if s.is_empty() {
            if element || self.depth == 0 {
                self.output.push_str("\"\"");
            }
            return Ok(());
        }
        match quote_for(s)? {
            Some(q) => {
                self.output.push(q);
                self.output.push_str(s);
                self.output.push(q);
            }
            None => self.output.push_str(s),
        }
        Ok(())
    }

    fn write_absent(&mut self) {
        let element = std::mem::take(&mut self.element);
        let blank = if element || self.depth == 0 { "\"\"" } else { " " };
        self.output.push_str(blank);
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = SeqSerializer<'a>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = MapSerializer<'a>;
    type SerializeStructVariant = MapSerializer<'a>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_scalar(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.write_text(v.encode_utf8(&mut [0; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_text(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<()> {
        self.write_absent();
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.write_absent();
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.write_text(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.open_variant(variant)?;
        value.serialize(&mut *self)?;
        self.close_variant();
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.open('[')?;
        Ok(SeqSerializer {
            ser: self,
            variant: false,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.open_variant(variant)?;
        self.open('[')?;
        Ok(SeqSerializer {
            ser: self,
            variant: true,
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.open('{')?;
        Ok(MapSerializer {
            ser: self,
            key: None,
            variant: false,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.open_variant(variant)?;
        self.open('{')?;
        Ok(MapSerializer {
            ser: self,
            key: None,
            variant: true,
        })
    }
}

/// Streams the elements of sequences, tuples and tuple variants.
pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
    variant: bool,
}

impl SeqSerializer<'_> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.indent();
        self.ser.element = true;
        value.serialize(&mut *self.ser)?;
        self.ser.element = false;
        self.ser.output.push('\n');
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.ser.close(']');
        if self.variant {
            self.ser.close_variant();
        }
        Ok(())
    }
}

impl ser::SerializeSeq for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// Streams the entries of maps, structs and struct variants.
pub struct MapSerializer<'a> {
    ser: &'a mut Serializer,
    key: Option<String>,
    variant: bool,
}

impl MapSerializer<'_> {
    fn entry<T>(&mut self, name: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.write_name(name)?;
        value.serialize(&mut *self.ser)?;
        self.ser.output.push('\n');
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.ser.close('}');
        if self.variant {
            self.ser.close_variant();
        }
        Ok(())
    }
}

impl ser::SerializeMap for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::encode("serialize_value called before serialize_key"))?;
        self.entry(&key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStruct for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// Turns a map key into the text of a hash entry name.
///
/// Only scalar keys are accepted.
struct KeySerializer;

impl KeySerializer {
    fn checked(key: String) -> Result<String> {
        check_key(&key)?;
        Ok(key)
    }

    fn reject(kind: &str) -> Error {
        Error::encode(format!("hash keys must be scalars, found {kind}"))
    }
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = ser::Impossible<String, Error>;
    type SerializeTuple = ser::Impossible<String, Error>;
    type SerializeTupleStruct = ser::Impossible<String, Error>;
    type SerializeTupleVariant = ser::Impossible<String, Error>;
    type SerializeMap = ser::Impossible<String, Error>;
    type SerializeStruct = ser::Impossible<String, Error>;
    type SerializeStructVariant = ser::Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Self::checked(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Self::checked(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(Self::reject("bytes"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(Self::reject("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(Self::reject("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String> {
        Err(Self::reject(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Self::checked(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(Self::reject(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Self::reject("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Self::reject("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Self::reject(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Self::reject(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Self::reject("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Self::reject(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Self::reject(name))
    }
}

/// Serializer producing a [`Node`] tree.
///
/// Scalars become literals holding the same text [`Serializer`] would
/// write; `None` and unit become empty literals.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeSerializer {
    depth: usize,
}

impl NodeSerializer {
    pub fn new() -> Self {
        NodeSerializer::default()
    }

    fn nested(self) -> Result<Self> {
        if self.depth >= MAX_ENCODE_DEPTH {
            return Err(Error::encode("nesting is too deep"));
        }
        Ok(NodeSerializer {
            depth: self.depth + 1,
        })
    }
}

fn wrap_variant(variant: &str, payload: Node) -> Node {
    let mut map = NodeMap::with_capacity(1);
    map.insert(variant.to_string(), payload);
    Node::Hash(map)
}

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = Error;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeList;
    type SerializeMap = SerializeHash;
    type SerializeStruct = SerializeHash;
    type SerializeStructVariant = SerializeHash;

    fn serialize_bool(self, v: bool) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_char(self, v: char) -> Result<Node> {
        Ok(Node::literal(v))
    }

    fn serialize_str(self, v: &str) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node> {
        Ok(Node::List(v.iter().map(|b| Node::literal(b)).collect()))
    }

    fn serialize_none(self) -> Result<Node> {
        Ok(Node::Literal(String::new()))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node> {
        Ok(Node::Literal(String::new()))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Node> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node> {
        Ok(Node::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        let payload = value.serialize(self.nested()?)?;
        Ok(wrap_variant(variant, payload))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList> {
        Ok(SerializeList {
            items: Vec::with_capacity(len.unwrap_or(0)),
            inner: self.nested()?,
            variant: None,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeList> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeList> {
        Ok(SerializeList {
            items: Vec::with_capacity(len),
            inner: self.nested()?.nested()?,
            variant: Some(variant),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeHash> {
        Ok(SerializeHash {
            map: NodeMap::with_capacity(len.unwrap_or(0)),
            key: None,
            inner: self.nested()?,
            variant: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeHash> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeHash> {
        Ok(SerializeHash {
            map: NodeMap::with_capacity(len),
            key: None,
            inner: self.nested()?.nested()?,
            variant: Some(variant),
        })
    }
}

pub struct SerializeList {
    items: Vec<Node>,
    inner: NodeSerializer,
    variant: Option<&'static str>,
}

impl SerializeList {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(self.inner)?);
        Ok(())
    }

    fn finish(self) -> Node {
        let list = Node::List(self.items);
        match self.variant {
            Some(variant) => wrap_variant(variant, list),
            None => list,
        }
    }
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeList {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

pub struct SerializeHash {
    map: NodeMap,
    key: Option<String>,
    inner: NodeSerializer,
    variant: Option<&'static str>,
}

impl SerializeHash {
    fn insert<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        check_key(&key)?;
        self.map.insert(key, value.serialize(self.inner)?);
        Ok(())
    }

    fn finish(self) -> Node {
        let hash = Node::Hash(self.map);
        match self.variant {
            Some(variant) => wrap_variant(variant, hash),
            None => hash,
        }
    }
}

impl ser::SerializeMap for SerializeHash {
    type Ok = Node;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::encode("serialize_value called before serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeHash {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeHash {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

/// Converts a value into a [`Node`] tree without going through text.
///
/// # Errors
///
/// [`Error::Encode`] for map keys that are not scalars or could not be
/// decoded back, and for values nested deeper than [`MAX_ENCODE_DEPTH`].
///
/// # Examples
///
/// ```rust
/// use kson::{kson, to_node};
/// use std::collections::BTreeMap;
///
/// let mut ports = BTreeMap::new();
/// ports.insert("http", vec![80, 8080]);
/// assert_eq!(to_node(&ports).unwrap(), kson!({ "http": ["80", "8080"] }));
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_node<T>(value: &T) -> Result<Node>
where
    T: ?Sized + Serialize,
{
    value.serialize(NodeSerializer::new())
}
