//! Primitive coercion of raw tokens into values.
//!
//! Decoding is lenient: a malformed number becomes `0` and an unrecognised
//! boolean becomes `false`. Nothing in this module returns an error.

use crate::{Number, ZoonValue};
use std::borrow::Cow;

/// The literal that stands for an absent value.
pub const NULL_MARKER: &str = "~";

/// How a raw token should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeHint {
    /// No declared type: booleans, numbers, then text.
    Auto,
    /// `i` and `i+` columns.
    Int,
    /// `b` columns.
    Bool,
    /// `s` columns, enums and `=` values. Underscores decode as spaces.
    Str,
    /// `t` columns and quoted cells. Taken verbatim.
    Text,
}

/// Parses `token` according to `hint`.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::coerce::{parse_primitive, TypeHint};
/// use serde_zoon::ZoonValue;
///
/// assert_eq!(parse_primitive("y", TypeHint::Auto), ZoonValue::Bool(true));
/// assert_eq!(parse_primitive("42", TypeHint::Auto), ZoonValue::from(42));
/// assert_eq!(parse_primitive("New_York", TypeHint::Auto), ZoonValue::from("New York"));
/// assert_eq!(parse_primitive("oops", TypeHint::Int), ZoonValue::from(0));
/// assert_eq!(parse_primitive("~", TypeHint::Bool), ZoonValue::Null);
/// ```
pub fn parse_primitive(token: &str, hint: TypeHint) -> ZoonValue {
    if hint == TypeHint::Text {
        return ZoonValue::String(token.to_string());
    }
    if token == NULL_MARKER {
        return ZoonValue::Null;
    }

    match hint {
        TypeHint::Int => ZoonValue::Number(Number::Integer(token.parse().unwrap_or(0))),
        TypeHint::Bool => ZoonValue::Bool(matches!(token, "1" | "y" | "true")),
        TypeHint::Str => ZoonValue::String(restore_spaces(token).into_owned()),
        TypeHint::Text => ZoonValue::String(token.to_string()),
        TypeHint::Auto => parse_auto(token),
    }
}

fn parse_auto(token: &str) -> ZoonValue {
    match token {
        "y" => return ZoonValue::Bool(true),
        "n" => return ZoonValue::Bool(false),
        _ => {}
    }
    if let Ok(i) = token.parse::<i64>() {
        return ZoonValue::Number(Number::Integer(i));
    }
    match token {
        "true" => return ZoonValue::Bool(true),
        "false" => return ZoonValue::Bool(false),
        _ => {}
    }
    if looks_numeric(token) {
        if let Ok(f) = token.parse::<f64>() {
            return ZoonValue::Number(Number::Float(f));
        }
    }
    // Bracketed lists stay opaque.
    if token.starts_with('[') {
        return ZoonValue::String(token.to_string());
    }
    ZoonValue::String(restore_spaces(token).into_owned())
}

fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        || matches!(digits, "inf" | "NaN")
}

/// Replaces `_` with a space.
pub fn restore_spaces(token: &str) -> Cow<'_, str> {
    if token.contains('_') {
        Cow::Owned(token.replace('_', " "))
    } else {
        Cow::Borrowed(token)
    }
}

/// Replaces a space with `_`.
pub fn encode_spaces(text: &str) -> Cow<'_, str> {
    if text.contains(' ') {
        Cow::Owned(text.replace(' ', "_"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_order() {
        assert_eq!(parse_primitive("n", TypeHint::Auto), ZoonValue::Bool(false));
        assert_eq!(parse_primitive("-7", TypeHint::Auto), ZoonValue::from(-7));
        assert_eq!(parse_primitive("true", TypeHint::Auto), ZoonValue::Bool(true));
        assert_eq!(parse_primitive("9.5", TypeHint::Auto), ZoonValue::from(9.5));
        assert_eq!(parse_primitive("v1.2", TypeHint::Auto), ZoonValue::from("v1.2"));
    }

    #[test]
    fn test_auto_keeps_brackets_verbatim() {
        assert_eq!(
            parse_primitive("[a_b c]", TypeHint::Auto),
            ZoonValue::from("[a_b c]")
        );
    }

    #[test]
    fn test_int_is_lenient() {
        assert_eq!(parse_primitive("12", TypeHint::Int), ZoonValue::from(12));
        assert_eq!(parse_primitive("12abc", TypeHint::Int), ZoonValue::from(0));
        assert_eq!(parse_primitive("", TypeHint::Int), ZoonValue::from(0));
    }

    #[test]
    fn test_bool_tokens() {
        for token in ["1", "y", "true"] {
            assert_eq!(parse_primitive(token, TypeHint::Bool), ZoonValue::Bool(true));
        }
        for token in ["0", "n", "false", "yes"] {
            assert_eq!(parse_primitive(token, TypeHint::Bool), ZoonValue::Bool(false));
        }
    }

    #[test]
    fn test_str_and_text() {
        assert_eq!(parse_primitive("a_b", TypeHint::Str), ZoonValue::from("a b"));
        assert_eq!(parse_primitive("123", TypeHint::Str), ZoonValue::from("123"));
        assert_eq!(parse_primitive("a_b", TypeHint::Text), ZoonValue::from("a_b"));
        assert_eq!(parse_primitive("~", TypeHint::Text), ZoonValue::from("~"));
        assert_eq!(parse_primitive("~", TypeHint::Str), ZoonValue::Null);
    }

    #[test]
    fn test_space_helpers_borrow_when_unchanged() {
        assert!(matches!(encode_spaces("plain"), Cow::Borrowed(_)));
        assert_eq!(encode_spaces("two words"), "two_words");
        assert_eq!(restore_spaces("two_words"), "two words");
    }
}
