//! ZOON Format Reference
//!
//! This module documents the ZOON (Zero Overhead Object Notation) format as
//! implemented by this library.
//!
//! # Overview
//!
//! ZOON is a line-oriented text format that carries the same data as JSON in
//! fewer tokens. A document is one of two forms, chosen by the shape of the
//! top-level value:
//!
//! | Top-level value | Form | First character |
//! |-----------------|------|-----------------|
//! | Array of records | Tabular | `#` (or `%` when aliases are present) |
//! | Record or map | Inline | anything else |
//!
//! Scalars and null cannot be documents on their own.
//!
//! # Inline Form
//!
//! A record is written on one line as space-separated `key<sep>value` pairs:
//!
//! ```text
//! host=api.example.com port:8080 ssl:n
//! ```
//!
//! | Value | Encoding | Example |
//! |-------|----------|---------|
//! | String | `=`, spaces written as `_` | `city=New_York` |
//! | Boolean | `:y` / `:n` | `ssl:n` |
//! | Number | `:` as written | `port:8080`, `ratio:0.5` |
//! | Null | `:~` | `next:~` |
//! | Record | `:{...}` holding inline pairs | `server:{host=localhost port:3000}` |
//! | List | `:[...]` opaque text | `tags:[a b_c]` |
//!
//! **Decoding rules**:
//! - `=` values are always strings: `zip=02134` decodes to `"02134"`
//! - `:` values are inferred: `y`/`n` become booleans, then integers, then
//!   `true`/`false`, then floats, otherwise the text with `_` read as a space
//! - Keys may be dotted paths: `a.b:1` builds `{"a": {"b": 1}}`
//! - Lists decode as the literal text between and including the brackets
//!
//! ```rust
//! use serde_zoon::{decode_document, ZoonValue};
//!
//! let value = decode_document("server:{host=localhost port:3000 ssl:y} zip=02134")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(value.pointer("server.port"), Some(&ZoonValue::from(3000)));
//! assert_eq!(value.pointer("zip"), Some(&ZoonValue::from("02134")));
//! ```
//!
//! # Tabular Form
//!
//! An array of records becomes optional alias lines, one header line, and one
//! line per row:
//!
//! ```text
//! %i=infrastructure
//! # @region=us-east-1 id:i+ %i.db.state=up|down name:s
//! up web-1
//! down web-2
//! ```
//!
//! Nested records are flattened to dotted column paths. Columns are listed in
//! path order and every line ends with a newline.
//!
//! ## Header Tokens
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `name:i` | Integer column |
//! | `id:i+` | Auto-increment column: no cell, values count from 1 |
//! | `name:b` | Boolean column, cells `1` / `0` |
//! | `name:s` | String column |
//! | `name:t` | Text column, every cell quoted |
//! | `name=a\|b\|c` | Enum column, cells are the literal option |
//! | `name!a\|b\|c` | Indexed enum column, cells are option positions |
//! | `@name=value` | String constant shared by every row |
//! | `@name:value` | Inferred constant (number, `y`/`n`) shared by every row |
//! | `+N` | Row count; the document has `N` rows and no data lines |
//!
//! ## Cells
//!
//! Cells are separated by spaces. A cell is quoted with `"..."` (escapes
//! `\" \\ \n \r \t`) when it would otherwise read back differently: empty
//! strings, whitespace, a literal `~`, or a leading `"` or `[`. An unquoted
//! `~` is null, and a missing trailing cell is null too.
//!
//! ## Aliases
//!
//! `%a=prefix` lets header names write `%a.rest` for `prefix.rest`. Several
//! definitions may share a line. Unknown aliases are left as written.
//!
//! ```rust
//! use serde_zoon::decode_document;
//!
//! let rows = decode_document("%i=infrastructure\n# %i.db.state=up|down name:s\nup web-1\n")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(
//!     rows.as_array().unwrap()[0].pointer("infrastructure.db.state").and_then(|v| v.as_str()),
//!     Some("up")
//! );
//! ```
//!
//! # Encoder Heuristics
//!
//! The encoder picks column types from the data. With default
//! [`ZoonOptions`](crate::ZoonOptions):
//!
//! - A column equal in every row (more than one row, not null, not a list or
//!   record) is hoisted into an `@` constant
//! - A top-level `id` column holding exactly `1..=N` becomes `i+`
//! - Boolean and integer columns become `b` and `i`
//! - A column with few distinct values becomes an enum, indexed when the
//!   positions are shorter than the literal options
//! - A string column whose average length exceeds 30 becomes `t`
//! - When no column needs a cell, the header carries `+N` and rows are omitted
//! - A path prefix repeated often enough is given an alias
//!
//! # Rust-Specific Serialization
//!
//! - **Struct fields** keep declaration order; map entries are sorted by key
//! - **Unit variants** encode as strings: `status=Active`
//! - **Newtype variants** encode as a one-key record: `Moved:{to=home}`
//! - **Tuple and struct variants** are rejected
//! - **Map keys** must be strings or characters
//!
//! # Limitations
//!
//! - **Lists** inside records are opaque text on decode
//! - **Field names** containing spaces come back with `_`
//! - **Underscores** in inline `=` values and unquoted string cells read back
//!   as spaces
//! - **Strings ending in `}`** inside a nested inline record are ambiguous with
//!   the closing brace
//! - **Row counts** from `+N` are taken as written; a hand-edited header with a
//!   huge count builds that many rows, so bound untrusted input before decoding.

// This module contains only documentation; no implementation code
