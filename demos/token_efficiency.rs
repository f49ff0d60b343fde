//! ZOON vs JSON size comparison.
//!
//! Run with: cargo run --example token_efficiency

use serde::{Deserialize, Serialize};
use serde_zoon::to_string;
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    email: String,
    role: String,
    active: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let names = ["Alice Johnson", "Bob Smith", "Charlie Brown", "Dana Scully"];
    let users: Vec<User> = names
        .iter()
        .zip(1..)
        .map(|(name, id)| User {
            id,
            name: name.to_string(),
            email: format!("user{}@example.com", id),
            role: if id == 1 { "admin" } else { "member" }.to_string(),
            active: id != 3,
        })
        .collect();

    let json = serde_json::to_string(&users)?;
    println!("JSON ({} chars):\n{}\n", json.len(), json);

    let zoon = to_string(&users)?;
    println!("ZOON ({} chars):\n{}", zoon.len(), zoon);

    let savings = (json.len() as f64 - zoon.len() as f64) / json.len() as f64 * 100.0;
    println!(
        "✓ Size savings: {:.1}% ({} → {} chars)",
        savings,
        json.len(),
        zoon.len()
    );

    Ok(())
}
