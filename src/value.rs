//! Dynamic value representation for ZOON data.
//!
//! This module provides the [`ZoonValue`] enum, the shape every document passes
//! through on its way to and from text:
//!
//! - [`ZoonValue`]: null, bool, number, string, array or object
//! - [`Number`]: integer or floating-point number
//!
//! Encoding turns any `T: Serialize` into a `ZoonValue` first, then renders it.
//! Decoding assembles a `ZoonValue` tree from the document and hands it to the
//! target's `Deserialize` implementation.
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_zoon::{ZoonValue, Number};
//!
//! let null = ZoonValue::Null;
//! let boolean = ZoonValue::from(true);
//! let number = ZoonValue::from(42);
//! let text = ZoonValue::from("hello");
//!
//! assert!(null.is_null());
//! assert_eq!(number, ZoonValue::Number(Number::Integer(42)));
//! ```
//!
//! ## Token Form
//!
//! `Display` renders a value the way it appears inside a document: `~` for
//! null, spaces in strings become `_`, nested objects are wrapped in braces.
//!
//! ```rust
//! use serde_zoon::ZoonValue;
//!
//! assert_eq!(ZoonValue::Null.to_string(), "~");
//! assert_eq!(ZoonValue::from("New York").to_string(), "New_York");
//! ```

use crate::ZoonMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any ZOON value.
///
/// Sequences nested below the top level have no structural encoding; they are
/// rendered as opaque `[a b c]` text and come back as strings.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::{ZoonValue, Number};
///
/// let num = ZoonValue::Number(Number::Integer(42));
/// let text = ZoonValue::String("hello".to_string());
///
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ZoonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ZoonValue>),
    Object(ZoonMap),
}

/// A numeric value: either a signed 64-bit integer or a float.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it is an integer or a whole float in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zoon::Number;
    ///
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl ZoonValue {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, ZoonValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, ZoonValue::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, ZoonValue::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, ZoonValue::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, ZoonValue::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, ZoonValue::Object(_))
    }

    /// Short name of the value's shape, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            ZoonValue::Null => "null",
            ZoonValue::Bool(_) => "bool",
            ZoonValue::Number(Number::Integer(_)) => "integer",
            ZoonValue::Number(Number::Float(_)) => "float",
            ZoonValue::String(_) => "string",
            ZoonValue::Array(_) => "array",
            ZoonValue::Object(_) => "object",
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ZoonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zoon::ZoonValue;
    ///
    /// assert_eq!(ZoonValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(ZoonValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ZoonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ZoonValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ZoonValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<ZoonValue>> {
        match self {
            ZoonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ZoonMap> {
        match self {
            ZoonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut ZoonMap> {
        match self {
            ZoonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up a dotted path such as `"server.port"` through nested objects.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zoon::zoon;
    ///
    /// let config = zoon!({ "server": { "port": 3000 } });
    /// assert_eq!(config.pointer("server.port").and_then(|v| v.as_i64()), Some(3000));
    /// assert!(config.pointer("server.host").is_none());
    /// ```
    #[must_use]
    pub fn pointer(&self, path: &str) -> Option<&ZoonValue> {
        path.split('.')
            .try_fold(self, |current, segment| current.as_object()?.get(segment))
    }
}

impl fmt::Display for ZoonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::inline::render_value(self))
    }
}

impl Serialize for ZoonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ZoonValue::Null => serializer.serialize_unit(),
            ZoonValue::Bool(b) => serializer.serialize_bool(*b),
            ZoonValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            ZoonValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            ZoonValue::String(s) => serializer.serialize_str(s),
            ZoonValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            ZoonValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ZoonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ZoonValueVisitor;

        impl<'de> Visitor<'de> for ZoonValueVisitor {
            type Value = ZoonValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid ZOON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(ZoonValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(ZoonValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => ZoonValue::Number(Number::Integer(i)),
                    Err(_) => ZoonValue::Number(Number::Float(value as f64)),
                })
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(ZoonValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ZoonValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(ZoonValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(ZoonValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(ZoonValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(ZoonValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ZoonMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(ZoonValue::Object(values))
            }
        }

        deserializer.deserialize_any(ZoonValueVisitor)
    }
}

impl TryFrom<ZoonValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: ZoonValue) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| {
            crate::Error::custom(format!("expected integer, found {}", value.kind_name()))
        })
    }
}

impl TryFrom<ZoonValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: ZoonValue) -> crate::Result<Self> {
        value.as_f64().ok_or_else(|| {
            crate::Error::custom(format!("expected number, found {}", value.kind_name()))
        })
    }
}

impl TryFrom<ZoonValue> for bool {
    type Error = crate::Error;

    fn try_from(value: ZoonValue) -> crate::Result<Self> {
        match value {
            ZoonValue::Bool(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                other.kind_name()
            ))),
        }
    }
}

impl TryFrom<ZoonValue> for String {
    type Error = crate::Error;

    fn try_from(value: ZoonValue) -> crate::Result<Self> {
        match value {
            ZoonValue::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.kind_name()
            ))),
        }
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ZoonValue {
                fn from(value: $ty) -> Self {
                    ZoonValue::Number(Number::Integer(i64::from(value)))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for ZoonValue {
    fn from(value: bool) -> Self {
        ZoonValue::Bool(value)
    }
}

impl From<f32> for ZoonValue {
    fn from(value: f32) -> Self {
        ZoonValue::Number(Number::Float(f64::from(value)))
    }
}

impl From<f64> for ZoonValue {
    fn from(value: f64) -> Self {
        ZoonValue::Number(Number::Float(value))
    }
}

impl From<String> for ZoonValue {
    fn from(value: String) -> Self {
        ZoonValue::String(value)
    }
}

impl From<&str> for ZoonValue {
    fn from(value: &str) -> Self {
        ZoonValue::String(value.to_string())
    }
}

impl<T: Into<ZoonValue>> From<Option<T>> for ZoonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ZoonValue::Null, Into::into)
    }
}

impl From<Vec<ZoonValue>> for ZoonValue {
    fn from(value: Vec<ZoonValue>) -> Self {
        ZoonValue::Array(value)
    }
}

impl From<ZoonMap> for ZoonValue {
    fn from(value: ZoonMap) -> Self {
        ZoonValue::Object(value)
    }
}
