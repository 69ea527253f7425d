//! Basic KSON serialization and deserialization.
//!
//! Run with: cargo run --example simple

use kson::{decode_str, from_str, to_string};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
    note: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            note: Some("[admin]".to_string()),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            note: None,
        },
    ];

    // Serialize to KSON
    let kson = to_string(&users)?;
    println!("KSON output:\n{}", kson);

    // Deserialize back to struct
    let users_back: Vec<User> = from_str(&kson)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful\n");

    // Hand-written documents are forgiving
    let relaxed = "[\n  {\n    ID: 0x2c\n    Name: Carol\n  }\n]\n";
    let carol: Vec<User> = from_str(relaxed)?;
    println!("Relaxed input: {:?}", carol[0]);

    // The untyped tree is available too
    let node = decode_str(&kson)?;
    println!("Raw tree:\n{}", node);

    Ok(())
}
