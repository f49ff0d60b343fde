//! Top-level dispatch between the tabular and inline forms.

use crate::inline::{decode_inline, encode_inline};
use crate::tabular::{decode_tabular, encode_tabular};
use crate::{Error, Result, ZoonOptions, ZoonValue};

/// Encodes a value tree as a document.
///
/// Arrays take the tabular form and records the inline form.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for a scalar or null at the top level,
/// or for an array whose elements are not records.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::{encode_document, zoon, ZoonOptions};
///
/// let value = zoon!({ "host": "api.example.com", "port": 8080, "ssl": false });
/// let text = encode_document(&value, &ZoonOptions::default()).unwrap();
/// assert_eq!(text, "host=api.example.com port:8080 ssl:n");
/// ```
pub fn encode_document(value: &ZoonValue, options: &ZoonOptions) -> Result<String> {
    match value {
        ZoonValue::Array(rows) => encode_tabular(rows, options),
        ZoonValue::Object(map) => Ok(encode_inline(map)),
        other => Err(Error::unsupported_type(&format!(
            "top level must be a record, map or sequence, found {}",
            other.kind_name()
        ))),
    }
}

/// Decodes a document into a value tree.
///
/// Text whose first character is `#` or `%` is tabular and yields an array;
/// anything else is inline and yields an object. Whitespace-only input
/// yields `None`.
///
/// # Errors
///
/// Propagates syntax, format and traversal errors from either form.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::{decode_document, ZoonValue};
///
/// let rows = decode_document("# id:i+ name:s\nAlice\nBob\n").unwrap().unwrap();
/// assert_eq!(rows.as_array().map(Vec::len), Some(2));
///
/// let record = decode_document("name=Alice").unwrap().unwrap();
/// assert_eq!(record.pointer("name"), Some(&ZoonValue::from("Alice")));
///
/// assert!(decode_document("  \n").unwrap().is_none());
/// ```
pub fn decode_document(input: &str) -> Result<Option<ZoonValue>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.starts_with(['#', '%']) {
        tracing::trace!("detected tabular document");
        decode_tabular(trimmed).map(|rows| Some(ZoonValue::Array(rows)))
    } else {
        tracing::trace!("detected inline document");
        decode_inline(trimmed).map(|map| Some(ZoonValue::Object(map)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoon;

    #[test]
    fn test_scalar_top_level_rejected() {
        let options = ZoonOptions::default();
        for value in [ZoonValue::Null, ZoonValue::from(1), ZoonValue::from("x")] {
            assert!(matches!(
                encode_document(&value, &options),
                Err(Error::UnsupportedType(_))
            ));
        }
    }

    #[test]
    fn test_dispatch_on_first_character() {
        let value = decode_document("%a=alpha\n# %a.x:i\n1\n").unwrap().unwrap();
        assert_eq!(value, zoon!([{ "alpha": { "x": 1 } }]));

        let value = decode_document("  x:1 ").unwrap().unwrap();
        assert_eq!(value, zoon!({ "x": 1 }));
    }

    #[test]
    fn test_empty_array_round_trip() {
        let text = encode_document(&zoon!([]), &ZoonOptions::default()).unwrap();
        assert_eq!(text, "");
        assert!(decode_document(&text).unwrap().is_none());
    }
}
