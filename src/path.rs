//! Assignment of raw tokens at dotted paths.
//!
//! Both codecs decode into a [`ZoonMap`] tree first. A path such as
//! `server.tls.enabled` walks (and creates) nested objects before the final
//! segment receives the coerced token.

use crate::coerce::{parse_primitive, TypeHint};
use crate::{Error, Result, ZoonMap, ZoonValue};

/// Sets `raw`, coerced per `hint`, at `path` below `root`.
///
/// Missing intermediate objects are created and null ones replaced. A token
/// wrapped in `{...}` is decoded as a nested inline record, unless `hint`
/// asks for plain text.
///
/// # Errors
///
/// Returns [`Error::Traversal`] when an intermediate segment already holds a
/// scalar or an array, and propagates syntax errors from nested records.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::coerce::TypeHint;
/// use serde_zoon::path::set_deep_field;
/// use serde_zoon::{ZoonMap, ZoonValue};
///
/// let mut root = ZoonMap::new();
/// set_deep_field(&mut root, "server.port", TypeHint::Int, "8080").unwrap();
/// set_deep_field(&mut root, "server.tls", TypeHint::Auto, "{on:y}").unwrap();
///
/// let server = root.get("server").and_then(ZoonValue::as_object).unwrap();
/// assert_eq!(server.get("port"), Some(&ZoonValue::from(8080)));
/// assert!(server.get("tls").unwrap().is_object());
/// ```
pub fn set_deep_field(root: &mut ZoonMap, path: &str, hint: TypeHint, raw: &str) -> Result<()> {
    let value = coerce_value(hint, raw)?;
    set_value_at(root, path, value)
}

/// Places an already decoded `value` at `path` below `root`.
///
/// # Errors
///
/// Returns [`Error::Traversal`] when an intermediate segment holds a non-object.
pub fn set_value_at(root: &mut ZoonMap, path: &str, value: ZoonValue) -> Result<()> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut current = root;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| ZoonValue::Object(ZoonMap::new()));
        if slot.is_null() {
            *slot = ZoonValue::Object(ZoonMap::new());
        }
        current = match slot {
            ZoonValue::Object(map) => map,
            other => return Err(Error::traversal(path, segment, other.kind_name())),
        };
    }

    current.insert(leaf.to_string(), value);
    Ok(())
}

fn coerce_value(hint: TypeHint, raw: &str) -> Result<ZoonValue> {
    if matches!(hint, TypeHint::Auto) && raw.starts_with('{') {
        let inner = raw.strip_prefix('{').unwrap_or(raw);
        let inner = inner.strip_suffix('}').unwrap_or(inner);
        return crate::inline::decode_inline(inner).map(ZoonValue::Object);
    }
    Ok(parse_primitive(raw, hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_intermediate_objects() {
        let mut root = ZoonMap::new();
        set_deep_field(&mut root, "a.b.c", TypeHint::Auto, "1").unwrap();
        set_deep_field(&mut root, "a.b.d", TypeHint::Str, "x_y").unwrap();
        let value = ZoonValue::Object(root);
        assert_eq!(value.pointer("a.b.c"), Some(&ZoonValue::from(1)));
        assert_eq!(value.pointer("a.b.d"), Some(&ZoonValue::from("x y")));
    }

    #[test]
    fn test_null_intermediate_becomes_object() {
        let mut root = ZoonMap::new();
        set_deep_field(&mut root, "owner", TypeHint::Auto, "~").unwrap();
        set_deep_field(&mut root, "owner.name", TypeHint::Str, "Ann").unwrap();
        let value = ZoonValue::Object(root);
        assert_eq!(value.pointer("owner.name"), Some(&ZoonValue::from("Ann")));
    }

    #[test]
    fn test_scalar_intermediate_is_traversal_error() {
        let mut root = ZoonMap::new();
        set_deep_field(&mut root, "a", TypeHint::Int, "5").unwrap();
        let err = set_deep_field(&mut root, "a.b", TypeHint::Int, "6").unwrap_err();
        match err {
            Error::Traversal {
                path,
                segment,
                found,
            } => {
                assert_eq!(path, "a.b");
                assert_eq!(segment, "a");
                assert_eq!(found, "integer");
            }
            other => panic!("expected traversal error, got {other:?}"),
        }
    }

    #[test]
    fn test_braces_decode_as_nested_record() {
        let mut root = ZoonMap::new();
        set_deep_field(&mut root, "db", TypeHint::Auto, "{host=h port:1 opts:{a:y}}").unwrap();
        let value = ZoonValue::Object(root);
        assert_eq!(value.pointer("db.port"), Some(&ZoonValue::from(1)));
        assert_eq!(value.pointer("db.opts.a"), Some(&ZoonValue::Bool(true)));
    }

    #[test]
    fn test_braces_stay_text_for_string_hints() {
        let mut root = ZoonMap::new();
        set_deep_field(&mut root, "s", TypeHint::Str, "{x}").unwrap();
        assert_eq!(root.get("s"), Some(&ZoonValue::from("{x}")));
    }

    #[test]
    fn test_malformed_nested_record_propagates() {
        let mut root = ZoonMap::new();
        assert!(set_deep_field(&mut root, "db", TypeHint::Auto, "{oops}").is_err());
    }
}
