//! The KSON document tree.
//!
//! A decoded document is a tree of [`Node`]s. Every leaf is a
//! [`Node::Literal`] holding raw text; interpretation as a number, boolean or
//! anything else happens on demand, either through the accessors here or by
//! binding the tree into a typed value with [`crate::from_node`].
//!
//! ## Examples
//!
//! ```rust
//! use kson::decode_str;
//!
//! let node = decode_str("{\n  db: {\n    host: 127.0.0.1\n    port: 5432\n  }\n}\n").unwrap();
//!
//! assert_eq!(node.query("db host").and_then(|n| n.as_str()), Some("127.0.0.1"));
//! assert_eq!(node.child("db").unwrap().child_value::<u16>("port").unwrap(), 5432);
//! assert_eq!(node.child("db").unwrap().child_value_or("user", 7u8), 7);
//! ```

use crate::coerce::FromLiteral;
use crate::options::Indent;
use crate::{Error, NodeMap, Result};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::HashMap;
use std::fmt;

/// One node of a KSON document.
///
/// `Empty` only exists while a node is still being decoded, or when a
/// tree is built by hand; a successfully decoded document never contains it.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Node {
    #[default]
    Empty,
    Literal(String),
    List(Vec<Node>),
    Hash(NodeMap),
}

/// The variant of a [`Node`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Empty,
    Literal,
    List,
    Hash,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Empty => "none",
            NodeKind::Literal => "literal",
            NodeKind::List => "list",
            NodeKind::Hash => "hash",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// Creates a literal from anything displayable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kson::Node;
    ///
    /// assert_eq!(Node::literal(8000), Node::Literal("8000".to_string()));
    /// ```
    pub fn literal<T: fmt::Display>(value: T) -> Self {
        Node::Literal(value.to_string())
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Node::Empty => NodeKind::Empty,
            Node::Literal(_) => NodeKind::Literal,
            Node::List(_) => NodeKind::List,
            Node::Hash(_) => NodeKind::Hash,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    #[must_use]
    pub const fn is_hash(&self) -> bool {
        matches!(self, Node::Hash(_))
    }

    /// Returns the text of a literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Literal(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_hash(&self) -> Option<&NodeMap> {
        match self {
            Node::Hash(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the child stored under exactly `name`, if this is a hash.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.as_hash()?.get(name)
    }

    /// Like [`Node::child`], but falls back to a case-insensitive match.
    #[must_use]
    pub fn child_fold(&self, name: &str) -> Option<&Node> {
        self.as_hash()?.get_fold(name)
    }

    /// Walks a space-separated path of hash keys.
    ///
    /// ```rust
    /// use kson::kson;
    ///
    /// let node = kson!({ "a": { "b": "c" } });
    /// assert_eq!(node.query("a b").and_then(|n| n.as_str()), Some("c"));
    /// assert!(node.query("a x").is_none());
    /// assert!(node.query("   ").is_none());
    /// ```
    #[must_use]
    pub fn query(&self, path: &str) -> Option<&Node> {
        let mut names = path.split(' ').map(str::trim).filter(|n| !n.is_empty());
        let first = names.next()?;
        names.try_fold(self.child(first)?, |current, name| current.child(name))
    }

    /// Parses a literal as `T`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNodeType`] when this is not a literal,
    /// [`Error::Coercion`] when the text is not a valid `T`.
    pub fn parse<T: FromLiteral>(&self) -> Result<T> {
        match self {
            Node::Literal(s) => T::from_literal(s),
            other => Err(Error::InvalidNodeType {
                expected: NodeKind::Literal.as_str(),
                found: other.kind().as_str(),
            }),
        }
    }

    /// Parses the literal child `name` as `T`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when there is no such child, otherwise as
    /// [`Node::parse`].
    pub fn child_value<T: FromLiteral>(&self, name: &str) -> Result<T> {
        self.child(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?
            .parse()
    }

    /// Parses the literal child `name` as `T`, or returns `default` when the
    /// child is missing or unparsable.
    pub fn child_value_or<T: FromLiteral>(&self, name: &str, default: T) -> T {
        self.child_value(name).unwrap_or(default)
    }

    /// Collects the literal items of a list, skipping nested containers.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNodeType`] when this is not a list.
    pub fn strings(&self) -> Result<Vec<String>> {
        let items = self.as_list().ok_or(Error::InvalidNodeType {
            expected: NodeKind::List.as_str(),
            found: self.kind().as_str(),
        })?;
        Ok(items
            .iter()
            .filter_map(Node::as_str)
            .map(str::to_string)
            .collect())
    }

    /// Collects the literal entries of a hash, skipping nested containers.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNodeType`] when this is not a hash.
    pub fn string_map(&self) -> Result<HashMap<String, String>> {
        let map = self.as_hash().ok_or(Error::InvalidNodeType {
            expected: NodeKind::Hash.as_str(),
            found: self.kind().as_str(),
        })?;
        Ok(map
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect())
    }

    fn dump_to(&self, out: &mut String, depth: usize) {
        match self {
            Node::Empty => {}
            Node::Literal(s) => out.push_str(s),
            Node::List(items) => {
                out.push_str("[\n");
                for item in items {
                    Indent::Tab.write_to(out, depth + 1);
                    item.dump_to(out, depth + 1);
                    out.push('\n');
                }
                Indent::Tab.write_to(out, depth);
                out.push(']');
            }
            Node::Hash(map) => {
                out.push_str("{\n");
                for (name, child) in map {
                    Indent::Tab.write_to(out, depth + 1);
                    out.push_str(name);
                    out.push(':');
                    child.dump_to(out, depth + 1);
                    out.push('\n');
                }
                Indent::Tab.write_to(out, depth);
                out.push('}');
            }
        }
    }
}

/// Writes the tree as tab-indented text without any quoting.
///
/// Meant for inspection; use [`crate::to_string`] for text that is
/// guaranteed to decode back to the same tree.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.dump_to(&mut out, 0);
        f.write_str(&out)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Literal(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Literal(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::List(value)
    }
}

impl From<NodeMap> for Node {
    fn from(value: NodeMap) -> Self {
        Node::Hash(value)
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Empty => serializer.serialize_unit(),
            Node::Literal(s) => serializer.serialize_str(s),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Hash(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any KSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Node, E> {
                Ok(Node::literal(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Node, E> {
                Ok(Node::literal(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Node, E> {
                Ok(Node::literal(value))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Node, E> {
                Ok(Node::literal(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Node, E> {
                Ok(Node::from(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Node, E> {
                Ok(Node::Literal(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Node, E> {
                Ok(Node::Empty)
            }

            fn visit_none<E>(self) -> std::result::Result<Node, E> {
                Ok(Node::Empty)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Node, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Node, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Node::List(items))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Node, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut hash = NodeMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Node>()? {
                    if key.is_empty() {
                        return Err(de::Error::custom("hash keys must not be empty"));
                    }
                    hash.insert(key, value);
                }
                Ok(Node::Hash(hash))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}
