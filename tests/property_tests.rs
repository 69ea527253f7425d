//! Property-based tests covering the round trip and idempotence guarantees
//! of the encoder and decoder across generated inputs.

use kson::{decode_str, from_str, to_node, to_string};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

/// True when the encoder has no quote character left for `s`.
fn unencodable(s: &str) -> bool {
    let needs_quotes = s.starts_with(['[', ']', '{', '}', '`', '"'])
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.contains(['\r', '\n']);
    needs_quotes && s.contains('"') && s.contains('`')
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    id: u64,
    name: String,
    score: f64,
    enabled: bool,
    parent: Option<i32>,
    labels: Vec<String>,
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _:#,.\\-\\[\\]{}\"`\t\n]{0,24}".prop_filter("encodable", |s| !unencodable(s))
}

fn record() -> impl Strategy<Value = Record> {
    (
        any::<u64>(),
        text(),
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
        any::<bool>(),
        proptest::option::of(any::<i32>()),
        prop::collection::vec(text(), 0..6),
    )
        .prop_map(|(id, name, score, enabled, parent, labels)| Record {
            id,
            name,
            score,
            enabled,
            parent,
            labels,
        })
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert!(roundtrip(&f));
    }

    #[test]
    fn prop_top_level_string(s in text()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_vec_option_i32(v in prop::collection::vec(proptest::option::of(any::<i32>()), 0..10)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }

    #[test]
    fn prop_record(r in record()) {
        prop_assert!(roundtrip(&r));
    }

    #[test]
    fn prop_encode_is_idempotent(r in record()) {
        let node = decode_str(&to_string(&r).unwrap()).unwrap();
        let again = decode_str(&to_string(&node).unwrap()).unwrap();
        prop_assert_eq!(&node, &again);
        prop_assert_eq!(node, to_node(&r).unwrap());
    }
}
