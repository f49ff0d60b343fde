//! Tabular format for homogeneous records.
//!
//! Run with: cargo run --example tabular_arrays

use serde::{Deserialize, Serialize};
use serde_zoon::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    in_stock: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Ticket {
    id: u32,
    status: String,
    queue: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let products = vec![
        Product {
            sku: "WIDGET-001".into(),
            name: "Super Widget".into(),
            price: 29.99,
            in_stock: true,
        },
        Product {
            sku: "GADGET-002".into(),
            name: "Mega Gadget".into(),
            price: 49.99,
            in_stock: false,
        },
        Product {
            sku: "TOOL-003".into(),
            name: "Ultra Tool".into(),
            price: 19.99,
            in_stock: true,
        },
    ];

    let zoon = to_string(&products)?;
    println!("Products:\n{}", zoon);

    let products_back: Vec<Product> = from_str(&zoon)?;
    assert_eq!(products, products_back);
    println!("✓ Round-trip successful\n");

    // Sequential ids, repeated values and shared fields shrink the table
    let statuses = ["open", "in_progress", "resolved"];
    let tickets: Vec<Ticket> = (1..=9)
        .map(|id| Ticket {
            id,
            status: statuses[id as usize % 3].to_string(),
            queue: "support".to_string(),
        })
        .collect();

    let zoon = to_string(&tickets)?;
    println!("Tickets:\n{}", zoon);

    let tickets_back: Vec<Ticket> = from_str(&zoon)?;
    assert_eq!(tickets_back.len(), tickets.len());
    assert_eq!(tickets_back[8].id, 9);
    println!("✓ Decoded {} tickets", tickets_back.len());

    Ok(())
}
