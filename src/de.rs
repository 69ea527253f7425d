//! KSON binding: [`Node`] tree to typed values.
//!
//! The binder is a serde [`Deserializer`](serde::Deserializer) that reads a
//! decoded [`Node`] tree. It never fails on the *content* of a literal: the
//! text is coerced on demand to whatever the destination asks for, and a
//! literal that does not coerce leaves the destination at its previous
//! value, or its zero value when there is none.
//!
//! ## Binding rules
//!
//! | Destination | Node | Result |
//! |---|---|---|
//! | scalar | non-empty literal | parsed with [`FromLiteral`]; previous value and a warning if it does not parse |
//! | scalar | empty literal, missing | previous value, zero for a new destination |
//! | `Vec`, sets | list | one element per item |
//! | arrays, tuples | list | the first `min(len, capacity)` items, remaining slots zero |
//! | bytes | list / literal | one byte per item / the text's bytes |
//! | maps | hash | existing entries kept, one entry per key, keys coerced like literals |
//! | structs | hash | fields looked up by exact name, then case-insensitively |
//! | `Option` | empty literal, missing | previous value, `None` for a new destination |
//! | enums | literal / one-entry hash | unit variant / variant with payload |
//! | open (`Node`, `serde_json::Value`) | any | literal as string, list as sequence, hash as map |
//!
//! A node of the wrong shape (a list where a number is expected, say) binds
//! like a missing one.
//!
//! ## Missing fields
//!
//! A struct field with no entry in the hash keeps its previous value when
//! binding into an existing destination with [`bind`]. For a new
//! destination, serde's own rules come first: `Option` fields are `None`
//! and `#[serde(default)]` attributes apply. Any other field takes the zero
//! value of its type, so records need no defaults to tolerate missing
//! entries. A type with no zero value (one that cannot be built from empty
//! text, like `IpAddr`) needs an existing value or a serde default.
//!
//! A literal rejected by a field type's own `Deserialize` impl (a malformed
//! address, say) is logged and treated like a missing entry.
//!
//! ## Examples
//!
//! ```rust
//! use kson::{decode_str, from_node};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server {
//!     name: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! let node = decode_str("{\n  NAME: api\n  port: 0x1F90\n}\n").unwrap();
//! let server: Server = from_node(&node).unwrap();
//! assert_eq!(server, Server { name: "api".into(), port: 8080, tags: vec![] });
//! ```

use crate::coerce::FromLiteral;
use crate::ser::to_node;
use crate::{Error, Node, NodeMap, Result};
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, DeserializeOwned, DeserializeSeed, Visitor};
use serde::forward_to_deserialize_any;
use serde::Serialize;
use std::cell::RefCell;
use tracing::{debug, warn};

/// Identity of a node within the tree being bound.
fn address(node: &Node) -> usize {
    node as *const Node as usize
}

fn is_blank(node: &Node) -> bool {
    match node {
        Node::Empty => true,
        Node::Literal(text) => text.is_empty(),
        Node::List(_) | Node::Hash(_) => false,
    }
}

/// A field of one struct type, identified by the type's field list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FieldKey {
    fields: usize,
    name: &'static str,
}

impl FieldKey {
    fn new(fields: &'static [&'static str], name: &'static str) -> Self {
        FieldKey {
            fields: fields.as_ptr() as usize,
            name,
        }
    }
}

#[derive(Debug)]
enum Failure {
    /// A field with no entry and no serde default.
    Missing(FieldKey),
    /// A literal the field type's `Deserialize` impl refused.
    Rejected {
        node: usize,
        field: &'static str,
        literal: String,
        reason: String,
    },
}

/// What earlier passes over the same tree learned.
///
/// Serde reports a missing field or a refused literal only by failing the
/// whole value, so the binder records the spot and binds again with it
/// zero-filled or skipped.
#[derive(Debug, Default)]
struct Pass {
    zero_fill: Vec<FieldKey>,
    rejected: Vec<usize>,
    failure: RefCell<Option<Failure>>,
}

impl Pass {
    /// Keeps the innermost failure; outer frames see the same error again.
    fn record(&self, failure: Failure) {
        let mut slot = self.failure.borrow_mut();
        if slot.is_none() {
            *slot = Some(failure);
        }
    }

    /// Prepares the next pass, `false` when the last failure is fatal.
    fn retry(&mut self) -> bool {
        match self.failure.get_mut().take() {
            Some(Failure::Missing(key)) if !self.zero_fill.contains(&key) => {
                debug!(field = key.name, "field has no entry and no default, using zero value");
                self.zero_fill.push(key);
                true
            }
            Some(Failure::Rejected {
                node,
                field,
                literal,
                reason,
            }) if !self.rejected.contains(&node) => {
                warn!(
                    field,
                    literal = %literal,
                    %reason,
                    "literal rejected by destination, keeping previous value"
                );
                self.rejected.push(node);
                true
            }
            _ => false,
        }
    }
}

/// Binds a [`Node`] tree into any type implementing `Deserialize`.
///
/// The deserializer borrows the tree, so destinations may borrow string
/// literals from it (`&str` fields). Used directly it makes a single pass:
/// a struct field with no entry and no serde default is an
/// [`Error::MissingField`]. [`from_node`] and [`bind`] fill such fields
/// with zero values.
#[derive(Clone, Copy, Debug)]
pub struct Deserializer<'a, 'de> {
    /// `None` stands for a value the document does not contain.
    node: Option<&'de Node>,
    /// The destination's current value, merged under `node`.
    existing: Option<&'de Node>,
    field: Option<&'de str>,
    pass: Option<&'a Pass>,
}

impl<'a, 'de> Deserializer<'a, 'de> {
    pub fn new(node: &'de Node) -> Self {
        Deserializer {
            node: Some(node),
            existing: None,
            field: None,
            pass: None,
        }
    }

    fn root(node: &'de Node, existing: Option<&'de Node>, pass: &'a Pass) -> Self {
        let parent = Deserializer {
            node: None,
            existing: None,
            field: None,
            pass: Some(pass),
        };
        parent.child(Some(node), existing, None)
    }

    /// Pairs a document node with the existing value at the same place.
    /// The existing value stands in wherever the document is blank.
    fn child(
        &self,
        node: Option<&'de Node>,
        existing: Option<&'de Node>,
        field: Option<&'de str>,
    ) -> Self {
        let node = node.filter(|n| !self.is_rejected(n));
        match existing {
            Some(existing) if node.map_or(true, is_blank) => Deserializer {
                node: Some(existing),
                existing: None,
                field,
                pass: self.pass,
            },
            _ => Deserializer {
                node,
                existing,
                field,
                pass: self.pass,
            },
        }
    }

    fn is_rejected(&self, node: &Node) -> bool {
        self.pass
            .is_some_and(|pass| pass.rejected.contains(&address(node)))
    }

    fn zero_fills(&self, key: FieldKey) -> bool {
        self.pass.is_some_and(|pass| pass.zero_fill.contains(&key))
    }

    fn record(&self, failure: Failure) {
        if let Some(pass) = self.pass {
            pass.record(failure);
        }
    }

    fn field_name(&self) -> &'de str {
        self.field.unwrap_or("<root>")
    }

    /// The node, with empty literals and `Empty` folded into `None`.
    fn present(&self) -> Option<&'de Node> {
        self.node.filter(|node| !is_blank(node))
    }

    fn existing_hash(&self) -> Option<&'de NodeMap> {
        self.existing.and_then(Node::as_hash)
    }

    fn mismatch(&self, node: &Node, expected: &str) {
        debug!(
            field = self.field_name(),
            found = %node.kind(),
            expected,
            "node shape does not match destination, keeping previous value"
        );
    }

    /// The existing scalar, or zero.
    fn previous<T: FromLiteral + Default>(&self) -> T {
        match self.existing {
            Some(Node::Literal(text)) => T::from_literal(text).unwrap_or_default(),
            _ => T::default(),
        }
    }

    fn scalar<T: FromLiteral + Default>(&self) -> T {
        match self.present() {
            None => T::default(),
            Some(Node::Literal(text)) => T::from_literal(text).unwrap_or_else(|err| {
                warn!(
                    field = self.field_name(),
                    literal = %text,
                    expected = T::KIND,
                    %err,
                    "literal does not coerce, keeping previous value"
                );
                self.previous()
            }),
            Some(other) => {
                self.mismatch(other, T::KIND);
                self.previous()
            }
        }
    }

    fn text(&self) -> &'de str {
        match self.node {
            Some(Node::Literal(text)) => text,
            Some(other @ (Node::List(_) | Node::Hash(_))) => {
                self.mismatch(other, "string");
                self.existing.and_then(Node::as_str).unwrap_or("")
            }
            _ => "",
        }
    }

    fn items(&self) -> &'de [Node] {
        match self.present() {
            Some(Node::List(items)) => items,
            Some(other) => {
                self.mismatch(other, "list");
                &[]
            }
            None => &[],
        }
    }

    fn hash(&self, expected: &str) -> Option<&'de NodeMap> {
        match self.present() {
            Some(Node::Hash(map)) => Some(map),
            Some(other) => {
                self.mismatch(other, expected);
                None
            }
            None => None,
        }
    }

    fn first_variant<V>(
        &self,
        name: &str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let Some(&first) = variants.first() else {
            return Err(Error::bind(format!("enum {name} has no variants")));
        };
        visitor.visit_enum(Enum {
            variant: first,
            payload: self.child(None, None, self.field),
        })
    }
}

macro_rules! deserialize_scalars {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                visitor.$visit(self.scalar::<$ty>())
            }
        )*
    };
}

impl<'a, 'de> de::Deserializer<'de> for Deserializer<'a, 'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.node {
            Some(Node::Literal(text)) => visitor.visit_borrowed_str(text),
            Some(Node::List(items)) => visitor.visit_seq(Seq::new(self, items, items.len())),
            Some(Node::Hash(map)) => visitor.visit_map(Hash::new(self, Some(map))),
            Some(Node::Empty) | None => visitor.visit_unit(),
        }
    }

    deserialize_scalars! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
        deserialize_char => visit_char(char),
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.text())
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.present() {
            Some(Node::List(items)) => {
                let bytes = items
                    .iter()
                    .map(|item| self.child(Some(item), None, self.field).scalar::<u8>())
                    .collect();
                visitor.visit_byte_buf(bytes)
            }
            _ => visitor.visit_borrowed_bytes(self.text().as_bytes()),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.present() {
            Some(_) => visitor.visit_some(self),
            None => visitor.visit_none(),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let items = self.items();
        visitor.visit_seq(Seq::new(self, items, items.len()))
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let items = self.items();
        if items.len() > len {
            debug!(
                field = self.field_name(),
                items = items.len(),
                capacity = len,
                "list is longer than its destination, truncating"
            );
        }
        visitor.visit_seq(Seq::new(self, items, len))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_map(Hash::new(self, self.hash("hash")))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let result = visitor.visit_map(Struct {
            parent: self,
            map: self.hash("struct"),
            existing: self.existing_hash(),
            all: fields,
            fields: fields.iter(),
            pending: None,
        });
        if let Err(Error::MissingField(name)) = &result {
            self.record(Failure::Missing(FieldKey::new(fields, *name)));
        }
        result
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.present() {
            Some(Node::Literal(text)) if variants.contains(&text.as_str()) => {
                visitor.visit_enum(Enum {
                    variant: text,
                    payload: self.child(None, None, self.field),
                })
            }
            Some(Node::Literal(text)) => {
                warn!(
                    field = self.field_name(),
                    literal = %text,
                    expected = name,
                    "unknown variant, using the first one"
                );
                self.first_variant(name, variants, visitor)
            }
            Some(Node::Hash(map)) if map.len() == 1 => match map.iter().next() {
                Some((variant, payload)) => {
                    let existing = self.existing_hash().and_then(|m| m.get(variant));
                    visitor.visit_enum(Enum {
                        variant,
                        payload: self.child(Some(payload), existing, self.field),
                    })
                }
                None => self.first_variant(name, variants, visitor),
            },
            Some(other) => {
                self.mismatch(other, name);
                self.first_variant(name, variants, visitor)
            }
            None => self.first_variant(name, variants, visitor),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Sequence access yielding exactly `len` elements: list items first, then
/// missing values.
struct Seq<'a, 'de> {
    parent: Deserializer<'a, 'de>,
    items: &'de [Node],
    index: usize,
    len: usize,
}

impl<'a, 'de> Seq<'a, 'de> {
    fn new(parent: Deserializer<'a, 'de>, items: &'de [Node], len: usize) -> Self {
        Seq {
            parent,
            items,
            index: 0,
            len,
        }
    }
}

impl<'a, 'de> de::SeqAccess<'de> for Seq<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        if self.index >= self.len {
            return Ok(None);
        }
        let node = self.items.get(self.index);
        self.index += 1;
        let element = self.parent.child(node, None, self.parent.field);
        seed.deserialize(element).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len - self.index)
    }
}

/// Map access over the entries of a hash, after the existing entries the
/// hash does not mention.
struct Hash<'a, 'de> {
    parent: Deserializer<'a, 'de>,
    map: Option<&'de NodeMap>,
    kept: Option<indexmap::map::Iter<'de, String, Node>>,
    entries: Option<indexmap::map::Iter<'de, String, Node>>,
    pending: Option<(&'de str, Deserializer<'a, 'de>)>,
}

impl<'a, 'de> Hash<'a, 'de> {
    fn new(parent: Deserializer<'a, 'de>, map: Option<&'de NodeMap>) -> Self {
        Hash {
            parent,
            map,
            kept: parent.existing_hash().map(NodeMap::iter),
            entries: map.map(NodeMap::iter),
            pending: None,
        }
    }

    fn next_entry(&mut self) -> Option<(&'de str, Deserializer<'a, 'de>)> {
        let map = self.map;
        if let Some(kept) = self.kept.as_mut() {
            let unmentioned = kept.find(|(key, _)| !map.is_some_and(|m| m.contains_key(key)));
            if let Some((key, value)) = unmentioned {
                let key = key.as_str();
                return Some((key, self.parent.child(Some(value), None, Some(key))));
            }
        }
        let (key, value) = self.entries.as_mut()?.next()?;
        let key = key.as_str();
        let existing = self.parent.existing_hash().and_then(|m| m.get(key));
        Some((key, self.parent.child(Some(value), existing, Some(key))))
    }
}

impl<'a, 'de> de::MapAccess<'de> for Hash<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.next_entry() {
            Some((key, value)) => {
                self.pending = Some((key, value));
                seed.deserialize(KeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((_, value)) => seed.deserialize(value),
            None => Err(Error::bind("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.kept {
            Some(_) => None,
            None => Some(self.entries.as_ref().map_or(0, ExactSizeIterator::len)),
        }
    }
}

/// Map access over the declared fields of a struct.
///
/// A field is yielded when the hash or the existing value has something
/// for it, or when an earlier pass found it missing with no default.
/// Other fields are left to serde's missing-field handling.
struct Struct<'a, 'de> {
    parent: Deserializer<'a, 'de>,
    map: Option<&'de NodeMap>,
    existing: Option<&'de NodeMap>,
    all: &'static [&'static str],
    fields: std::slice::Iter<'static, &'static str>,
    pending: Option<(&'static str, Deserializer<'a, 'de>)>,
}

impl<'a, 'de> de::MapAccess<'de> for Struct<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        for &field in self.fields.by_ref() {
            let node = self.map.and_then(|map| map.get_fold(field));
            let existing = self.existing.and_then(|map| map.get_fold(field));
            let value = self.parent.child(node, existing, Some(field));
            if value.present().is_none() && !value.zero_fills(FieldKey::new(self.all, field)) {
                continue;
            }
            self.pending = Some((field, value));
            return seed.deserialize(BorrowedStrDeserializer::new(field)).map(Some);
        }
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let Some((field, value)) = self.pending.take() else {
            return Err(Error::bind("next_value_seed called before next_key_seed"));
        };
        seed.deserialize(value).map_err(|err| match (value.present(), err) {
            (_, err @ Error::MissingField(_)) => err,
            (Some(node @ Node::Literal(text)), err) => {
                value.record(Failure::Rejected {
                    node: address(node),
                    field,
                    literal: text.clone(),
                    reason: err.to_string(),
                });
                err
            }
            (None, err) => Error::bind(format!("field `{field}` has no value to bind: {err}")),
            (Some(_), err) => err,
        })
    }
}

struct Enum<'a, 'de> {
    variant: &'de str,
    payload: Deserializer<'a, 'de>,
}

impl<'a, 'de> de::EnumAccess<'de> for Enum<'a, 'de> {
    type Error = Error;
    type Variant = Variant<'a, 'de>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.variant))?;
        Ok((
            variant,
            Variant {
                payload: self.payload,
            },
        ))
    }
}

struct Variant<'a, 'de> {
    payload: Deserializer<'a, 'de>,
}

impl<'a, 'de> de::VariantAccess<'de> for Variant<'a, 'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        seed.deserialize(self.payload)
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple(self.payload, len, visitor)
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(self.payload, "", fields, visitor)
    }
}
/// Deserializer for hash keys.
///
/// Keys are coerced with the literal rules, but unlike values a key that
/// does not coerce is an error: there is no zero key to fall back on.
struct KeyDeserializer<'de> {
    key: &'de str,
}

impl<'de> KeyDeserializer<'de> {
    fn coerce<T: FromLiteral>(&self) -> Result<T> {
        T::from_literal(self.key)
            .map_err(|err| Error::bind(format!("hash key {:?}: {err}", self.key)))
    }
}

macro_rules! deserialize_keys {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                visitor.$visit(self.coerce::<$ty>()?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.key)
    }

    deserialize_keys! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
        deserialize_char => visit_char(char),
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_enum(BorrowedStrDeserializer::<Error>::new(self.key))
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}


/// Binds `node` over `existing`, repeating the pass while earlier passes
/// turn up fields to zero-fill or literals to skip.
fn bind_passes<'de, T>(node: &'de Node, existing: Option<&'de Node>) -> Result<T>
where
    T: de::Deserialize<'de>,
{
    let mut pass = Pass::default();
    loop {
        let err = match T::deserialize(Deserializer::root(node, existing, &pass)) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !pass.retry() {
            return Err(err);
        }
    }
}

/// Binds `node` into a new `T`.
///
/// # Errors
///
/// Returns [`Error::Bind`] when the destination cannot accept the tree at
/// all: a hash key that does not coerce to the map's key type, an enum
/// variant selected by a hash that the enum does not have, a field with no
/// entry whose type has no zero value, or a custom error raised by the
/// destination's own `Deserialize` impl outside a struct field. Literals
/// that do not coerce are not errors; see the module documentation.
///
/// # Examples
///
/// ```rust
/// use kson::{from_node, kson};
/// use std::collections::HashMap;
///
/// let node = kson!({ "1": "one", "2": "two" });
/// let map: HashMap<u8, String> = from_node(&node).unwrap();
/// assert_eq!(map[&2], "two");
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_node<'de, T>(node: &'de Node) -> Result<T>
where
    T: de::Deserialize<'de>,
{
    bind_passes(node, None)
}

/// Binds `node` into an existing destination, in place.
///
/// Whatever the document leaves out keeps its current value: struct fields
/// with no entry or an empty literal, map entries the hash does not
/// mention, and scalars whose literal does not coerce. Lists replace the
/// current sequence. `dest` is only written when binding succeeds.
///
/// # Errors
///
/// As [`from_node`].
///
/// # Examples
///
/// ```rust
/// use kson::{bind, kson};
/// use std::collections::BTreeMap;
///
/// let mut ports = [0u16; 3];
/// bind(&kson!(["80", "443"]), &mut ports).unwrap();
/// assert_eq!(ports, [80, 443, 0]);
///
/// let mut env = BTreeMap::from([("HOME".to_string(), "/root".to_string())]);
/// bind(&kson!({ "PATH": "/bin" }), &mut env).unwrap();
/// assert_eq!(env.len(), 2);
/// ```
pub fn bind<T>(node: &Node, dest: &mut T) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let existing = match to_node(&*dest) {
        Ok(existing) => Some(existing),
        Err(err) => {
            debug!(%err, "destination does not encode, binding as new");
            None
        }
    };
    *dest = bind_passes(node, existing.as_ref())?;
    Ok(())
}
