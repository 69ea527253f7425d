use chrono::{DateTime, NaiveDate, Utc};
use kson::{
    bind, decode_str, from_node, from_str, kson, to_node, to_string, to_string_with_options,
    unmarshal, Error, Indent, KsonOptions, Node,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    println!("User KSON: {}", text);

    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec![],
        },
        items: vec![
            Product {
                sku: "A-1".to_string(),
                price: 9.99,
                quantity: 2,
            },
            Product {
                sku: "[B-2]".to_string(),
                price: 14.5,
                quantity: 1,
            },
        ],
        total: 34.48,
        note: None,
    };

    let text = to_string(&order).unwrap();
    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order, order_back);
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
struct Poco {
    name: String,
    int: i32,
    float: f32,
    bool: bool,
    date: String,
    string: String,
    quote: String,
    json: String,
    xml: String,
    empty: String,
}

const POCO: &str = "
\t{
\t\tName:\tvalue \t\t
\t\tInt:\t-1024\t\t
\t\tFloat:\t6.4\t\t\t
\t\tBool:\ttrue\t\t
\t\tDate: \t2012-12-21
\t\tString:\tabcdefghijklmnopqrstuvwxyz/字符串 #:[]{}
\t\tQuote:\t\"[0,1,2,3,4,5,6,7,8,9]\"

\t\tJson: \t`
\t\t\tvar father = {
\t\t\t    \"Name\": \"John\",
\t\t\t    \"Children\": [\"Richard\", \"Susan\"]
\t\t\t};
\t\t`\t\t
\t\tXml: \"
\t\t\t<root>
\t\t\t\t<text>I'll be back</text>
\t\t\t</root>
\t\t\"
\t\tEmpty:\t
\t}
\t";

#[test]
fn test_poco_document() {
    let poco: Poco = from_str(POCO).unwrap();
    assert_eq!(poco.name, "value");
    assert_eq!(poco.int, -1024);
    assert_eq!(poco.float, 6.4);
    assert!(poco.bool);
    assert_eq!(poco.date, "2012-12-21");
    assert_eq!(poco.string, "abcdefghijklmnopqrstuvwxyz/字符串 #:[]{}");
    assert_eq!(poco.quote, "[0,1,2,3,4,5,6,7,8,9]");
    assert!(poco.json.starts_with("\n\t\t\tvar father = {"));
    assert!(poco.json.ends_with("};\n\t\t"));
    assert!(poco.xml.contains("<text>I'll be back</text>"));
    assert_eq!(poco.empty, "");
}

#[test]
fn test_poco_round_trip() {
    let poco: Poco = from_str(POCO).unwrap();
    let text = to_string(&poco).unwrap();
    assert!(text.contains("\tJson:`\n"));
    assert!(text.contains("\tXml:\"\n"));
    let back: Poco = from_str(&text).unwrap();
    assert_eq!(poco, back);
}

#[test]
fn test_quoted_literals_round_trip() {
    let text = to_string(&r#"he said "hi""#).unwrap();
    assert_eq!(text, "`he said \"hi\"`\n");
    assert_eq!(from_str::<String>(&text).unwrap(), r#"he said "hi""#);

    let text = to_string(&"plain").unwrap();
    assert_eq!(text, "plain\n");
    assert_eq!(from_str::<String>(&text).unwrap(), "plain");
}

#[test]
fn test_array_truncation() {
    let node = kson!(["1", "2", "3", "4", "5"]);
    let mut dest = [9u8; 3];
    bind(&node, &mut dest).unwrap();
    assert_eq!(dest, [1, 2, 3]);

    let short = kson!(["7"]);
    bind(&short, &mut dest).unwrap();
    assert_eq!(dest, [7, 0, 0]);
}

#[test]
fn test_missing_field_tolerance() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Record {
        #[serde(rename = "A")]
        a: i32,
        #[serde(rename = "B")]
        b: i32,
    }
    let record: Record = from_str("{\n A: 1\n}\n").unwrap();
    assert_eq!(record, Record { a: 1, b: 0 });
}

#[test]
fn test_case_insensitive_fallback() {
    #[derive(Deserialize)]
    struct Person {
        #[serde(rename = "Name")]
        name: String,
    }
    let person: Person = from_str("{\n name: tom\n}\n").unwrap();
    assert_eq!(person.name, "tom");
}

#[test]
fn test_malformed_input() {
    let err = from_str::<Node>("{ a: 1 ] }").unwrap_err();
    assert!(err.is_format());
    assert!(matches!(err, Error::Format { line: 1, .. }));
}

#[test]
fn test_coercion_failure_keeps_siblings() {
    let user: User = from_str("{\n id: twelve\n name: Bob\n active: yes\n}\n").unwrap();
    assert_eq!(
        user,
        User {
            name: "Bob".to_string(),
            ..User::default()
        }
    );
}

#[test]
fn test_unmarshal_into_existing() {
    let mut user = User::default();
    unmarshal(b"{\n id: 0x2A\n tags: [\n  a\n ]\n}\n", &mut user).unwrap();
    assert_eq!(user.id, 42);
    assert_eq!(user.tags, vec!["a"]);
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Backend {
    Memory,
    Disk { path: String, sync: bool },
    Remote(String),
}

#[test]
fn test_enum_round_trip() {
    let backends = vec![
        Backend::Memory,
        Backend::Disk {
            path: "/var/lib/kv".to_string(),
            sync: true,
        },
        Backend::Remote("tcp://10.0.0.1:7000".to_string()),
    ];
    let text = to_string(&backends).unwrap();
    let back: Vec<Backend> = from_str(&text).unwrap();
    assert_eq!(backends, back);
}

#[test]
fn test_integer_keyed_maps() {
    let mut map = BTreeMap::new();
    map.insert(404u16, "not found".to_string());
    map.insert(500u16, " server error".to_string());
    let text = to_string(&map).unwrap();
    let back: BTreeMap<u16, String> = from_str(&text).unwrap();
    assert_eq!(map, back);
}

#[test]
fn test_json_value_open_slot() {
    let value: serde_json::Value = from_str("{\n a: 1\n b: [\n  x\n  y\n ]\n c:\n}\n").unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "a": "1", "b": ["x", "y"], "c": "" })
    );
}

#[test]
fn test_json_value_encoding() {
    let value = serde_json::json!({ "n": 1, "s": "x", "none": null, "list": [true, 2.5] });
    let node = decode_str(&to_string(&value).unwrap()).unwrap();
    assert_eq!(
        node,
        kson!({ "n": 1, "s": "x", "none": "", "list": ["true", "2.5"] })
    );
}

#[test]
fn test_chrono_types() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Release {
        day: NaiveDate,
        at: DateTime<Utc>,
    }
    let release = Release {
        day: NaiveDate::from_ymd_opt(2012, 12, 21).unwrap(),
        at: DateTime::parse_from_rfc3339("2012-12-21T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc),
    };
    let text = to_string(&release).unwrap();
    assert!(text.contains("day:2012-12-21\n"));
    let back: Release = from_str(&text).unwrap();
    assert_eq!(release, back);
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Pair {
    a: u8,
    b: u8,
}

#[test]
fn test_bind_in_place() {
    let mut pair = Pair { a: 5, b: 7 };
    bind(&kson!({ "a": "1" }), &mut pair).unwrap();
    assert_eq!(pair, Pair { a: 1, b: 7 });
    bind(&kson!({ "a": "1", "b": "" }), &mut pair).unwrap();
    assert_eq!(pair, Pair { a: 1, b: 7 });

    let mut pair = Pair { a: 5, b: 7 };
    unmarshal(b"{\n a: 1\n b:\n}\n", &mut pair).unwrap();
    assert_eq!(pair, Pair { a: 1, b: 7 });

    let mut env: HashMap<String, String> = HashMap::new();
    env.insert("home".to_string(), "/root".to_string());
    unmarshal(b"{\n path: /bin\n}\n", &mut env).unwrap();
    assert_eq!(env.len(), 2);
    assert_eq!(env["home"], "/root");
    assert_eq!(env["path"], "/bin");
}

#[test]
fn test_missing_typed_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Peer {
        name: String,
        addr: std::net::IpAddr,
        since: NaiveDate,
    }
    let mut peer = Peer {
        name: "a".to_string(),
        addr: "10.0.0.1".parse().unwrap(),
        since: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
    };
    unmarshal(b"{\n name: b\n}\n", &mut peer).unwrap();
    assert_eq!(peer.name, "b");
    assert_eq!(peer.addr.to_string(), "10.0.0.1");
    assert_eq!(peer.since, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());

    unmarshal(b"{\n since: someday\n}\n", &mut peer).unwrap();
    assert_eq!(peer.since, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());

    #[derive(Deserialize, Debug, PartialEq)]
    struct Lease {
        addr: Option<std::net::IpAddr>,
        #[serde(default)]
        since: Option<NaiveDate>,
    }
    let lease: Lease = from_str("{\n since: 2021-03-04\n}\n").unwrap();
    assert_eq!(lease.addr, None);
    assert_eq!(lease.since, NaiveDate::from_ymd_opt(2021, 3, 4));
}

#[test]
fn test_serde_default_attributes() {
    fn seven() -> u8 {
        7
    }
    #[derive(Deserialize, Debug, PartialEq)]
    struct WithDefault {
        a: u8,
        #[serde(default = "seven")]
        b: u8,
    }
    let w: WithDefault = from_str("{\n a: 1\n}\n").unwrap();
    assert_eq!(w, WithDefault { a: 1, b: 7 });

    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(default)]
    struct Tuning {
        workers: u16,
        queue: u32,
    }
    impl Default for Tuning {
        fn default() -> Self {
            Tuning {
                workers: 4,
                queue: 256,
            }
        }
    }
    let t: Tuning = from_str("{\n queue: 10\n}\n").unwrap();
    assert_eq!(t, Tuning { workers: 4, queue: 10 });
}

#[derive(Debug, PartialEq)]
struct Blob(Vec<u8>);

impl Serialize for Blob {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct BlobVisitor;
        impl<'de> serde::de::Visitor<'de> for BlobVisitor {
            type Value = Blob;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("bytes")
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Blob, E> {
                Ok(Blob(v.to_vec()))
            }

            fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<Blob, E> {
                Ok(Blob(v))
            }
        }
        d.deserialize_byte_buf(BlobVisitor)
    }
}

#[test]
fn test_bytes_round_trip() {
    let blob = Blob(vec![0, 1, 127, 255]);
    let text = to_string(&blob).unwrap();
    let back: Blob = from_str(&text).unwrap();
    assert_eq!(back, blob);

    let back: Blob = from_node(&to_node(&blob).unwrap()).unwrap();
    assert_eq!(back, blob);
}

#[test]
fn test_blank_document_round_trip() {
    assert_eq!(to_string(&"").unwrap(), "\"\"\n");
    assert_eq!(from_str::<String>(&to_string(&"").unwrap()).unwrap(), "");
    assert_eq!(from_str::<Option<u8>>(&to_string(&None::<u8>).unwrap()).unwrap(), None);
}

#[test]
fn test_to_node_agrees_with_text() {
    let mut env = HashMap::new();
    env.insert("auth".to_string(), "http://auth.io".to_string());
    env.insert("key".to_string(), String::new());
    let node = to_node(&env).unwrap();
    assert_eq!(decode_str(&to_string(&env).unwrap()).unwrap(), node);
    let back: HashMap<String, String> = from_node(&node).unwrap();
    assert_eq!(back, env);
}

#[test]
fn test_custom_indent() {
    let user = User {
        id: 1,
        name: "a".to_string(),
        active: false,
        tags: vec!["t".to_string()],
    };
    let options = KsonOptions::new().with_indent(Indent::Spaces(2));
    let text = to_string_with_options(&user, options).unwrap();
    assert_eq!(
        text,
        "{\n  id:1\n  name:a\n  active:false\n  tags:[\n    t\n  ]\n}\n"
    );
    let back: User = from_str(&text).unwrap();
    assert_eq!(user, back);
}

#[test]
fn test_unencodable_string() {
    let err = to_string(&" `both\" ").unwrap_err();
    assert!(matches!(err, Error::Encode(_)));
}
