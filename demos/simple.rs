//! Basic INI serialization and deserialization of typed records.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_ini_doc::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    name: String,
    age: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    k: String,
    k1: i64,
    k2: f64,
    k3: i32,
    user: User,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        k: "foobar".to_string(),
        k1: 1234,
        k2: 420.69,
        k3: -9999,
        user: User {
            name: "Brian".to_string(),
            age: 100,
        },
    };

    // Fields become keys, the nested record becomes [user]
    let ini = to_string(&config)?;
    println!("INI output:\n{}", ini);

    let config_back: Config = from_str(&ini)?;
    assert_eq!(config, config_back);
    println!("✓ Round-trip successful");

    Ok(())
}
