//! Basic ZOON serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_zoon::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
    ssl: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // A record encodes on one line
    let server = Server {
        host: "localhost".to_string(),
        port: 3000,
        ssl: true,
    };
    let inline = to_string(&server)?;
    println!("Inline output:\n{}\n", inline);
    assert_eq!(from_str::<Server>(&inline)?, server);

    // An array of records encodes as a table
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
        },
    ];

    let zoon = to_string(&users)?;
    println!("Tabular output:\n{}", zoon);

    let users_back: Vec<User> = from_str(&zoon)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
