//! Loading a configuration file with comments and an implicit top-level hash.
//!
//! Run with: cargo run --example config_file

use kson::{from_file, parse_file};
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fs;

const SETTINGS: &str = r#"
# server settings
Log: debug
Listen: 8000

Roles: [
    {
        Name: user
        # routes open to everyone
        Allow: [
            /user
            /order
        ]
    }
    {
        Name: root
        Allow: [
            /admin
        ]
    }
]

Db: {
    Type: mysql
    Sql: `
        SELECT * FROM "orders"
        WHERE id = ?
    `
}

Env: {
    auth: http://auth.io
    key: foobar
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Config {
    log: String,
    listen: u16,
    roles: Vec<Role>,
    db: Database,
    env: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Role {
    name: String,
    allow: Vec<String>,
    deny: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Database {
    r#type: String,
    sql: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("kson-demo-settings.conf");
    fs::write(&path, SETTINGS)?;

    let config: Config = from_file(&path)?;
    println!("log level: {}", config.log);
    println!("listening on: {}", config.listen);
    for role in &config.roles {
        println!("role {}: allow {:?}, deny {:?}", role.name, role.allow, role.deny);
    }
    println!("{} query:{}", config.db.r#type, config.db.sql);
    println!("env: {:?}", config.env);

    // Missing keys are zero values, lookups are available on the raw tree
    let node = parse_file(&path)?;
    let port: u16 = node.query("Db Port").map_or(Ok(3306), |n| n.parse())?;
    println!("db port (defaulted): {}", port);

    fs::remove_file(&path)?;
    Ok(())
}
