//! Customizing ZOON output with ZoonOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_zoon::{from_str, to_string_with_options, ZoonOptions};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct LogLine {
    id: u32,
    level: String,
    region: String,
    message: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let lines: Vec<LogLine> = (1..=4)
        .map(|id| LogLine {
            id,
            level: if id % 2 == 0 { "WARN" } else { "INFO" }.to_string(),
            region: "us-east-1".to_string(),
            message: format!("request {} served", id),
        })
        .collect();

    let variants = [
        ("Default", ZoonOptions::default()),
        ("No constant hoisting", ZoonOptions::new().with_hoist_constants(false)),
        ("No auto-increment", ZoonOptions::new().with_auto_increment(false)),
        ("No enums", ZoonOptions::new().with_max_enum_values(0)),
        ("Verbatim", ZoonOptions::verbatim()),
    ];

    for (label, options) in variants {
        let zoon = to_string_with_options(&lines, options)?;
        println!("{} ({} chars):\n{}", label, zoon.len(), zoon);

        // Every variant decodes to the same records
        let back: Vec<LogLine> = from_str(&zoon)?;
        assert_eq!(back, lines);
    }

    println!("✓ All variants decode identically");

    Ok(())
}
