//! Working with ZoonValue for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_zoon::{decode_document, from_value, to_string, to_value, zoon, ZoonValue};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    admin: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build config dynamically with the zoon! macro
    let config = zoon!({
        "host": "localhost",
        "port": 8080,
        "limits": { "rps": 100, "burst": 20 },
        "debug": true
    });

    println!("Config as ZOON:\n{}\n", to_string(&config)?);

    // Access values dynamically
    if let Some(host) = config.pointer("host").and_then(ZoonValue::as_str) {
        println!("Accessing field 'host': {}", host);
    }
    if let Some(rps) = config.pointer("limits.rps").and_then(ZoonValue::as_i64) {
        println!("Accessing field 'limits.rps': {}\n", rps);
    }

    // Convert an existing struct to a value and back
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        admin: true,
    };
    let user_value = to_value(&user)?;
    println!("User as ZOON:\n{}\n", to_string(&user_value)?);

    let back: User = from_value(user_value)?;
    println!("Back from value: {:?}\n", back);

    // Decode a document without a target type
    let Some(doc) = decode_document("# @region=eu id:i+ name:s\nweb\ndb\n")? else {
        return Ok(());
    };
    if let ZoonValue::Array(rows) = &doc {
        for row in rows {
            println!(
                "row {} -> {} in {}",
                row.pointer("id").and_then(ZoonValue::as_i64).unwrap_or_default(),
                row.pointer("name").and_then(ZoonValue::as_str).unwrap_or_default(),
                row.pointer("region").and_then(ZoonValue::as_str).unwrap_or_default(),
            );
        }
    }

    Ok(())
}
