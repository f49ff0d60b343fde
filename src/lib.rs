//! # serde_zoon
//!
//! A Serde-compatible serialization library for the ZOON (Zero Overhead Object Notation) format.
//!
//! ## What is ZOON?
//!
//! ZOON is a compact, line-oriented text format for records and arrays of records. Arrays
//! become a typed header plus one line per row; single records become one line of
//! `key=value` / `key:value` pairs. The encoder infers column types, hoists constant
//! columns into the header, generates `id` sequences and shortens repeated path prefixes,
//! so structured data costs far fewer tokens than the same data as JSON.
//!
//! ## Key Features
//!
//! - **Tabular Arrays**: Arrays of records serialize as a header and space-separated rows
//! - **Schema Inference**: Column types, enums, constants and aliases are chosen from the data
//! - **Serde Compatible**: Works with existing Rust types via `#[derive(Serialize, Deserialize)]`
//! - **Lenient Decoding**: Hand-edited documents load; malformed scalars become zero values
//! - **No Unsafe Code**: Written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_zoon = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Records (Inline Form)
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_zoon::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     ssl: bool,
//! }
//!
//! let server = Server {
//!     host: "api.example.com".to_string(),
//!     port: 8080,
//!     ssl: false,
//! };
//!
//! let zoon = to_string(&server).unwrap();
//! assert_eq!(zoon, "host=api.example.com port:8080 ssl:n");
//!
//! let back: Server = from_str(&zoon).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ### Arrays of Records (Tabular Form)
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_zoon::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     role: String,
//!     active: bool,
//! }
//!
//! let users = vec![
//!     User { id: 1, name: "Alice".into(), role: "Admin".into(), active: true },
//!     User { id: 2, name: "Bob".into(), role: "User".into(), active: true },
//!     User { id: 3, name: "Carol".into(), role: "User".into(), active: false },
//! ];
//!
//! let zoon = to_string(&users).unwrap();
//! assert_eq!(
//!     zoon,
//!     "# active:b id:i+ name:s role=Admin|User\n1 Alice Admin\n1 Bob User\n0 Carol User\n"
//! );
//!
//! let back: Vec<User> = from_str(&zoon).unwrap();
//! assert_eq!(users, back);
//! ```
//!
//! ### Dynamic Values with zoon! Macro
//!
//! ```rust
//! use serde_zoon::{zoon, ZoonValue};
//!
//! let data = zoon!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "serde"]
//! });
//!
//! if let ZoonValue::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Serialization**: two passes over an array, one to collect column statistics and one
//!   to emit rows
//! - **Deserialization**: single pass over the lines of a document
//! - **State**: aliases and the `i+` counter live for one call; nothing is shared between calls
//!
//! ## Diagnostics
//!
//! Encoder and decoder decisions (column types, aliases, ignored lines) are reported through
//! [`tracing`](https://docs.rs/tracing) at `debug` and `trace` level. The library installs no
//! subscriber.
//!
//! ## Format Reference
//!
//! See the [`format`] module for the complete description of the text format.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Encoding and decoding a record
//! - **`macro.rs`** - Building values with `zoon!`
//! - **`tabular_arrays.rs`** - Arrays of records and the tabular header
//! - **`dynamic_values.rs`** - Working with ZoonValue dynamically
//! - **`custom_options.rs`** - Turning encoder heuristics on and off
//! - **`token_efficiency.rs`** - Size comparison with JSON
//!
//! Run any example with: `cargo run --example <name>`

pub mod alias;
pub mod coerce;
pub mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod grammar;
pub mod header;
pub mod inline;
pub mod macros;
pub mod map;
pub mod options;
pub mod path;
pub mod ser;
pub mod tabular;
pub mod value;

pub use de::Deserializer;
pub use document::{decode_document, encode_document};
pub use error::{Error, Result};
pub use map::ZoonMap;
pub use options::ZoonOptions;
pub use ser::ZoonValueSerializer;
pub use value::{Number, ZoonValue};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;

/// Serialize any `T: Serialize` to a ZOON string.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "x:1 y:2");
/// ```
///
/// # Errors
///
/// Returns an error if the top-level value is not a record, map or sequence of records.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, ZoonOptions::default())
}

/// Serialize any `T: Serialize` to a ZOON string with custom encoder options.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::{to_string_with_options, ZoonOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Row { id: u32, kind: String }
///
/// let rows = vec![
///     Row { id: 1, kind: "a".into() },
///     Row { id: 2, kind: "a".into() },
/// ];
/// let zoon = to_string_with_options(&rows, ZoonOptions::verbatim()).unwrap();
/// assert_eq!(zoon, "# id:i kind:s\n1 a\n2 a\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: ZoonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    encode_document(&value, &options)
}

/// Serialize any `T: Serialize` to ZOON bytes.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Convert any `T: Serialize` to a `ZoonValue`.
///
/// Useful for working with ZOON data dynamically when the structure isn't known at compile time.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::{to_value, ZoonValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let value: ZoonValue = to_value(&point).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error for enum variants with tuple or struct payloads and for non-string map keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<ZoonValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(ZoonValueSerializer)
}

/// Serialize any `T: Serialize` to a writer in ZOON format.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &point).unwrap();
/// assert_eq!(buffer, b"x:1 y:2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, ZoonOptions::default())
}

/// Serialize any `T: Serialize` to a writer in ZOON format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: ZoonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let zoon_string = to_string_with_options(value, options)?;
    writer.write_all(zoon_string.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of ZOON text.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x:1 y:2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed or its shape does not fit `T`: tabular
/// documents need a sequence target and inline documents a struct or map target.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from an I/O stream of ZOON.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let cursor = Cursor::new(b"x:1 y:2");
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid ZOON,
/// or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of ZOON text.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_slice(b"x:1 y:2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid ZOON,
/// or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from a `ZoonValue`.
///
/// The same lenient conversions as [`from_str`] apply, but no top-level shape check.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::{from_value, zoon};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_value(zoon!({ "x": "1", "Y": 2 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if an enum cannot be read from the value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: ZoonValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(de::ValueDeserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        nickname: Option<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: -2 };
        let zoon = to_string(&point).unwrap();
        assert_eq!(zoon, "x:1 y:-2");
        let point_back: Point = from_str(&zoon).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_users() {
        let users = vec![
            User {
                id: 1,
                name: "Alice Smith".to_string(),
                active: true,
                nickname: None,
            },
            User {
                id: 2,
                name: "Bob".to_string(),
                active: false,
                nickname: Some("bobby".to_string()),
            },
        ];

        let zoon = to_string(&users).unwrap();
        let users_back: Vec<User> = from_str(&zoon).unwrap();
        assert_eq!(users, users_back);
    }

    #[test]
    fn test_to_value() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();

        match value {
            ZoonValue::Object(obj) => {
                assert_eq!(obj.get("x"), Some(&ZoonValue::Number(Number::Integer(1))));
                assert_eq!(obj.get("y"), Some(&ZoonValue::Number(Number::Integer(2))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_scalar_top_level_is_rejected() {
        assert!(matches!(to_string(&5), Err(Error::UnsupportedType(_))));
        assert!(matches!(to_string(&vec![1, 2]), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_maps() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), 2);
        map.insert("a".to_string(), 1);
        let zoon = to_string(&map).unwrap();
        assert_eq!(zoon, "a:1 b:2");
        let back: BTreeMap<String, i32> = from_str(&zoon).unwrap();
        assert_eq!(map, back);
    }

    #[test]
    fn test_to_vec_and_writer_agree() {
        let point = Point { x: 3, y: 4 };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();
        assert_eq!(buffer, to_vec(&point).unwrap());
        let back: Point = from_slice(&buffer).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn test_invalid_utf8() {
        let result: Result<Point> = from_slice(&[0xff, 0xfe]);
        assert!(result.is_err());
    }
}
