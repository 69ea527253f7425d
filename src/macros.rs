/// Builds a [`Node`](crate::Node) tree with JSON-like syntax.
///
/// Lists are written `[...]`, hashes `{ "key": value }`, and anything else
/// becomes a literal holding its `Display` text. Single-token values only;
/// wrap anything longer (`-1`, `a + b`) in parentheses.
///
/// # Examples
///
/// ```rust
/// use kson::{kson, Node};
///
/// let node = kson!({
///     "name": "tom",
///     "port": 8080,
///     "tags": ["a", (-1)],
///     "empty": {}
/// });
///
/// assert_eq!(node.child_value::<u16>("port").unwrap(), 8080);
/// assert_eq!(node.query("tags").unwrap().strings().unwrap(), vec!["a", "-1"]);
/// assert_eq!(node.child("empty").and_then(Node::as_hash).map(|m| m.len()), Some(0));
/// ```
#[macro_export]
macro_rules! kson {
    ([]) => {
        $crate::Node::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Node::List(vec![$($crate::kson!($elem)),*])
    };

    ({}) => {
        $crate::Node::Hash($crate::NodeMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut hash = $crate::NodeMap::new();
        $(
            hash.insert($key.to_string(), $crate::kson!($value));
        )*
        $crate::Node::Hash(hash)
    }};

    ($other:expr) => {
        $crate::Node::literal($other)
    };
}
