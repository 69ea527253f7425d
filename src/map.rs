//! Ordered map type for KSON hashes.
//!
//! [`NodeMap`] wraps an [`IndexMap`] so that hashes keep the order their
//! entries appeared in the document, which keeps dumps stable. Equality is
//! order-insensitive: two hashes with the same entries compare equal.
//!
//! ## Examples
//!
//! ```rust
//! use kson::{Node, NodeMap};
//!
//! let mut map = NodeMap::new();
//! map.insert("Name".to_string(), Node::from("tom"));
//!
//! assert_eq!(map.get("Name").and_then(Node::as_str), Some("tom"));
//! assert!(map.get("name").is_none());
//! assert_eq!(map.get_fold("name").and_then(Node::as_str), Some("tom"));
//! ```

use crate::Node;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to KSON nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeMap(IndexMap<String, Node>);

impl NodeMap {
    /// Creates an empty `NodeMap`.
    #[must_use]
    pub fn new() -> Self {
        NodeMap(IndexMap::new())
    }

    /// Creates an empty `NodeMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        NodeMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// A repeated key keeps its original position and takes the new value;
    /// the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kson::{Node, NodeMap};
    ///
    /// let mut map = NodeMap::new();
    /// assert!(map.insert("key".to_string(), Node::from("1")).is_none());
    /// assert!(map.insert("key".to_string(), Node::from("2")).is_some());
    /// assert_eq!(map.get("key").and_then(Node::as_str), Some("2"));
    /// ```
    pub fn insert(&mut self, key: String, value: Node) -> Option<Node> {
        self.0.insert(key, value)
    }

    /// Returns the node stored under exactly `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Returns the node stored under `key`, falling back to a
    /// case-insensitive match when there is no exact one.
    #[must_use]
    pub fn get_fold(&self, key: &str) -> Option<&Node> {
        self.0.get(key).or_else(|| {
            self.0
                .iter()
                .find(|(k, _)| eq_fold(k, key))
                .map(|(_, v)| v)
        })
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in document order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in document order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in document order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }
}

/// Unicode-aware case-insensitive comparison.
pub(crate) fn eq_fold(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl From<HashMap<String, Node>> for NodeMap {
    fn from(map: HashMap<String, Node>) -> Self {
        NodeMap(map.into_iter().collect())
    }
}

impl From<NodeMap> for HashMap<String, Node> {
    fn from(map: NodeMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for NodeMap {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeMap {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Node)> for NodeMap {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        NodeMap(IndexMap::from_iter(iter))
    }
}
