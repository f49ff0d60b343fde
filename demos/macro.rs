//! Using the zoon! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_zoon::{to_string, zoon, ZoonValue};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let null_val = zoon!(null);
    let bool_val = zoon!(true);
    let number = zoon!(42);
    let text = zoon!("Hello, ZOON!");

    // Scalars are not documents on their own, but render as single tokens
    println!("Primitives:");
    println!("  null:   {}", null_val);
    println!("  bool:   {}", bool_val);
    println!("  number: {}", number);
    println!("  text:   {}\n", text);

    let user = zoon!({
        "id": 123,
        "name": "Alice",
        "email": "alice@example.com",
        "active": true
    });

    println!("Objects:");
    println!("{}\n", to_string(&user)?);

    let config = zoon!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432,
            "name": "mydb"
        },
        "debug": true
    });

    println!("Nested structures:");
    println!("{}\n", to_string(&config)?);

    let items = zoon!([
        {"id": 1, "status": "active"},
        {"id": 2, "status": "pending"},
        {"id": 3, "status": "completed"}
    ]);

    println!("Arrays of records:");
    println!("{}", to_string(&items)?);

    if let Some(name) = config.pointer("app.name").and_then(ZoonValue::as_str) {
        println!("Accessing values:");
        println!("  App name: {}", name);
    }

    Ok(())
}
