use kson::{kson, Node, NodeKind, NodeMap};

#[test]
fn test_kson_macro_strings() {
    let text = kson!("hello world");
    assert_eq!(text, Node::Literal("hello world".to_string()));

    let empty = kson!("");
    assert_eq!(empty, Node::Literal(String::new()));
}

#[test]
fn test_kson_macro_scalars_become_text() {
    assert_eq!(kson!(42), Node::Literal("42".to_string()));
    assert_eq!(kson!(3.5), Node::Literal("3.5".to_string()));
    assert_eq!(kson!(false), Node::Literal("false".to_string()));
    assert_eq!(kson!((-123)), Node::Literal("-123".to_string()));
    assert_eq!(kson!('x'), Node::Literal("x".to_string()));
}

#[test]
fn test_kson_macro_lists() {
    let empty = kson!([]);
    assert_eq!(empty, Node::List(vec![]));

    let numbers = kson!([1, 2, 3]);
    assert_eq!(
        numbers,
        Node::List(vec![
            Node::Literal("1".to_string()),
            Node::Literal("2".to_string()),
            Node::Literal("3".to_string()),
        ])
    );

    let nested = kson!([[], ["a"], [["b"]]]);
    assert_eq!(nested.as_list().map(<[Node]>::len), Some(3));
    assert_eq!(nested.as_list().unwrap()[2], Node::List(vec![kson!(["b"])]));
}

#[test]
fn test_kson_macro_hashes() {
    let empty = kson!({});
    assert_eq!(empty, Node::Hash(NodeMap::new()));

    let hash = kson!({
        "name": "Alice",
        "age": 30,
        "active": true
    });
    assert_eq!(hash.kind(), NodeKind::Hash);
    assert_eq!(hash.child("name").and_then(Node::as_str), Some("Alice"));
    assert_eq!(hash.child_value::<u32>("age").unwrap(), 30);
    assert!(hash.child_value::<bool>("active").unwrap());
}

#[test]
fn test_kson_macro_keeps_key_order() {
    let hash = kson!({ "z": 1, "a": 2, "m": 3 });
    let keys: Vec<&String> = hash.as_hash().unwrap().keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_kson_macro_nested() {
    let config = kson!({
        "server": {
            "host": "127.0.0.1",
            "ports": [80, 443]
        },
        "users": [
            { "name": "tom" },
            { "name": "ann" }
        ],
    });

    assert_eq!(config.query("server host").and_then(Node::as_str), Some("127.0.0.1"));
    assert_eq!(
        config.query("server ports").unwrap().strings().unwrap(),
        vec!["80", "443"]
    );
    let users = config.child("users").and_then(Node::as_list).unwrap();
    assert_eq!(users[1].child("name").and_then(Node::as_str), Some("ann"));
}

#[test]
fn test_kson_macro_with_variables() {
    let host = "db.local";
    let port: u16 = 5432;
    let node = kson!({ "host": host, "port": port });
    assert_eq!(node, kson!({ "host": "db.local", "port": "5432" }));
}

#[test]
fn test_kson_macro_encodes() {
    let node = kson!({ "a": ["x", ""], "b": {} });
    let text = kson::to_string(&node).unwrap();
    assert_eq!(text, "{\n\ta:[\n\t\tx\n\t\t\"\"\n\t]\n\tb:{\n\t}\n}\n");
}
