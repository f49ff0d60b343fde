//! The inline form: one record or map on a single line.
//!
//! ```text
//! host=api.example.com port:8080 ssl:n tls:{cert=/etc/cert.pem}
//! ```
//!
//! Strings use `=` with spaces written as `_`. Everything else uses `:`:
//! booleans as `y`/`n`, numbers as written, null as `~`, nested records in
//! braces and lists as opaque `[a b c]` text.

use crate::coerce::{encode_spaces, TypeHint};
use crate::grammar::{parse_inline, Separator};
use crate::path::set_deep_field;
use crate::{Number, Result, ZoonMap, ZoonValue};

/// Encodes a record in inline form, fields in map order.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::inline::encode_inline;
/// use serde_zoon::{ZoonMap, ZoonValue};
///
/// let mut map = ZoonMap::new();
/// map.insert("city".to_string(), ZoonValue::from("New York"));
/// map.insert("pop".to_string(), ZoonValue::from(8_000_000));
/// map.insert("coastal".to_string(), ZoonValue::from(true));
/// assert_eq!(encode_inline(&map), "city=New_York pop:8000000 coastal:y");
/// ```
#[must_use]
pub fn encode_inline(map: &ZoonMap) -> String {
    let pairs: Vec<String> = map
        .iter()
        .map(|(key, value)| render_pair(key, value))
        .collect();
    pairs.join(" ")
}

/// Renders one `key<sep>value` pair. Spaces in the key are written as `_`.
#[must_use]
pub fn render_pair(key: &str, value: &ZoonValue) -> String {
    let key = encode_spaces(key);
    match value {
        ZoonValue::String(s) => format!("{}={}", key, encode_spaces(s)),
        ZoonValue::Bool(b) => format!("{}:{}", key, if *b { "y" } else { "n" }),
        other => format!("{}:{}", key, render_value(other)),
    }
}

/// Renders a value as a single token.
///
/// Booleans render as `true`/`false` here; the inline form and `b` columns
/// substitute their own short forms.
#[must_use]
pub fn render_value(value: &ZoonValue) -> String {
    match value {
        ZoonValue::Null => crate::coerce::NULL_MARKER.to_string(),
        ZoonValue::Bool(b) => b.to_string(),
        ZoonValue::Number(Number::Integer(i)) => i.to_string(),
        ZoonValue::Number(Number::Float(f)) => f.to_string(),
        ZoonValue::String(s) => encode_spaces(s).into_owned(),
        ZoonValue::Array(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(" "))
        }
        ZoonValue::Object(map) => format!("{{{}}}", encode_inline(map)),
    }
}

/// Decodes inline text into a record.
///
/// Keys may be dotted paths; `a.b:1` and `a:{b:1}` build the same record.
///
/// # Errors
///
/// Returns a syntax error for malformed pairs and a traversal error when a
/// dotted key runs through a scalar.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::inline::decode_inline;
/// use serde_zoon::ZoonValue;
///
/// let map = decode_inline("server:{host=localhost port:3000 ssl:y}").unwrap();
/// let server = map.get("server").and_then(ZoonValue::as_object).unwrap();
/// assert_eq!(server.get("host"), Some(&ZoonValue::from("localhost")));
/// assert_eq!(server.get("ssl"), Some(&ZoonValue::Bool(true)));
/// ```
pub fn decode_inline(input: &str) -> Result<ZoonMap> {
    let mut map = ZoonMap::new();
    for pair in parse_inline(input)? {
        let hint = match pair.separator {
            Separator::Text => TypeHint::Str,
            Separator::Typed | Separator::Indexed => TypeHint::Auto,
        };
        set_deep_field(&mut map, pair.key, hint, pair.value)?;
    }
    Ok(map)
}
