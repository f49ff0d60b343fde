//! Deserialization from ZOON text.
//!
//! Decoding mirrors encoding: the text is parsed into a [`ZoonValue`] tree by
//! [`decode_document`], and the tree is handed to the target type.
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_zoon::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! let users: Vec<User> = from_str("# id:i+ name:s\nAlice\nBob\n").unwrap();
//! assert_eq!(users[1], User { id: 2, name: "Bob".to_string() });
//! ```
//!
//! ## Leniency
//!
//! Scalars convert wherever a reading exists. Integer fields parse numeric
//! strings and truncate floats, boolean fields accept `1`, `y` and `true`,
//! string fields take the token form of numbers and booleans, and anything
//! unparsable or absent becomes the zero value of the field. Struct fields
//! match keys exactly first and then ignoring ASCII case.
//!
//! ## Top-level shape
//!
//! A tabular document can only fill a sequence and an inline document only a
//! struct or map. Empty input fills either with its empty value. Scalar
//! targets are rejected with [`Error::InvalidTarget`].

use crate::document::decode_document;
use crate::{Error, Number, Result, ZoonMap, ZoonValue};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializer over a whole ZOON document.
///
/// Created via [`Deserializer::from_str`]. The document is decoded when the
/// target type asks for its shape.
pub struct Deserializer<'de> {
    input: &'de str,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer { input }
    }

    fn document(&self) -> Result<Option<ZoonValue>> {
        decode_document(self.input)
    }

    /// The document as a record, empty input included.
    fn record(&self) -> Result<ZoonValue> {
        match self.document()? {
            Some(record @ ZoonValue::Object(_)) => Ok(record),
            None => Ok(ZoonValue::Object(ZoonMap::new())),
            Some(_) => Err(Error::invalid_target(
                "a tabular document decodes into a sequence, not a struct or map",
            )),
        }
    }
}

macro_rules! reject_scalar_target {
    ($($method:ident => $what:literal),* $(,)?) => {
        $(
            fn $method<V>(self, _visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                Err(Error::invalid_target(concat!(
                    "a document cannot decode into ",
                    $what
                )))
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.document()? {
            Some(value) => de::Deserializer::deserialize_any(ValueDeserializer::new(value), visitor),
            None => visitor.visit_unit(),
        }
    }

    reject_scalar_target! {
        deserialize_bool => "a boolean",
        deserialize_i8 => "an integer",
        deserialize_i16 => "an integer",
        deserialize_i32 => "an integer",
        deserialize_i64 => "an integer",
        deserialize_u8 => "an integer",
        deserialize_u16 => "an integer",
        deserialize_u32 => "an integer",
        deserialize_u64 => "an integer",
        deserialize_f32 => "a float",
        deserialize_f64 => "a float",
        deserialize_char => "a character",
        deserialize_str => "a string",
        deserialize_string => "a string",
        deserialize_bytes => "bytes",
        deserialize_byte_buf => "bytes",
        deserialize_unit => "unit",
        deserialize_identifier => "an identifier",
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::invalid_target(&format!(
            "a document cannot decode into unit struct {}",
            name
        )))
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::invalid_target(&format!(
            "a document cannot decode into enum {}",
            name
        )))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.input.trim().is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.document()? {
            Some(ZoonValue::Array(rows)) => visitor.visit_seq(SeqDeserializer::new(rows)),
            None => visitor.visit_seq(SeqDeserializer::new(Vec::new())),
            Some(_) => Err(Error::invalid_target(
                "an inline document decodes into a struct or map, not a sequence",
            )),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let record = self.record()?;
        de::Deserializer::deserialize_map(ValueDeserializer::new(record), visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let record = self.record()?;
        de::Deserializer::deserialize_struct(ValueDeserializer::new(record), name, fields, visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<ZoonValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<ZoonValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, ZoonValue>,
    value: Option<ZoonValue>,
}

impl MapDeserializer {
    fn new(map: ZoonMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(ZoonValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<ZoonValue>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<ZoonValue>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let name: de::value::StringDeserializer<Error> = self.variant.into_deserializer();
        let variant = seed.deserialize(name)?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<ZoonValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(ZoonValue::Null) | None => Ok(()),
            Some(other) => Err(Error::custom(format!(
                "expected unit variant, found {}",
                other.kind_name()
            ))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value.unwrap_or_default()))
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple(
            ValueDeserializer::new(self.value.unwrap_or_default()),
            len,
            visitor,
        )
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(
            ValueDeserializer::new(self.value.unwrap_or_default()),
            "",
            fields,
            visitor,
        )
    }
}

/// Lenient deserializer over an owned [`ZoonValue`].
pub(crate) struct ValueDeserializer {
    value: ZoonValue,
}

impl ValueDeserializer {
    pub(crate) fn new(value: ZoonValue) -> Self {
        ValueDeserializer { value }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::custom(format!(
            "expected {}, found {}",
            expected,
            self.value.kind_name()
        ))
    }

    /// Notes a value whose shape has no reading as the target.
    fn zero_for(&self, target: &str) {
        tracing::trace!(found = self.value.kind_name(), target, "using zero value");
    }

    fn lenient_i64(&self) -> i64 {
        match &self.value {
            ZoonValue::Number(Number::Integer(i)) => *i,
            ZoonValue::Number(Number::Float(f)) => *f as i64,
            ZoonValue::Bool(b) => i64::from(*b),
            ZoonValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                    .unwrap_or(0)
            }
            ZoonValue::Null => 0,
            ZoonValue::Array(_) | ZoonValue::Object(_) => {
                self.zero_for("integer");
                0
            }
        }
    }

    fn lenient_f64(&self) -> f64 {
        match &self.value {
            ZoonValue::Number(n) => n.as_f64(),
            ZoonValue::Bool(b) => f64::from(u8::from(*b)),
            ZoonValue::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            ZoonValue::Null => 0.0,
            ZoonValue::Array(_) | ZoonValue::Object(_) => {
                self.zero_for("float");
                0.0
            }
        }
    }

    fn lenient_bool(&self) -> bool {
        match &self.value {
            ZoonValue::Bool(b) => *b,
            ZoonValue::Number(n) => n.as_f64() != 0.0,
            ZoonValue::String(s) => matches!(s.trim(), "1" | "y" | "true"),
            ZoonValue::Null => false,
            ZoonValue::Array(_) | ZoonValue::Object(_) => {
                self.zero_for("bool");
                false
            }
        }
    }

    fn into_lenient_string(self) -> String {
        match self.value {
            ZoonValue::String(s) => s,
            ZoonValue::Null => String::new(),
            ZoonValue::Bool(b) => b.to_string(),
            ZoonValue::Number(n) => n.to_string(),
            other => crate::inline::render_value(&other),
        }
    }
}

macro_rules! lenient_integer {
    ($($method:ident => $ty:ty,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let wide = self.lenient_i64();
                let narrow = <$ty>::try_from(wide)
                    .unwrap_or_else(|_| out_of_range(wide, stringify!($ty)));
                visitor.visit_i64(i64::from(narrow))
            }
        )*
    };
}

fn out_of_range<T: Default>(value: i64, target: &str) -> T {
    tracing::trace!(value, target, "integer out of range, using zero value");
    T::default()
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ZoonValue::Null => visitor.visit_unit(),
            ZoonValue::Bool(b) => visitor.visit_bool(b),
            ZoonValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            ZoonValue::Number(Number::Float(f)) => visitor.visit_f64(f),
            ZoonValue::String(s) => visitor.visit_string(s),
            ZoonValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            ZoonValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(self.lenient_bool())
    }

    lenient_integer! {
        deserialize_i8 => i8,
        deserialize_i16 => i16,
        deserialize_i32 => i32,
        deserialize_i64 => i64,
        deserialize_u8 => u8,
        deserialize_u16 => u16,
        deserialize_u32 => u32,
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // Values past i64::MAX arrive as floats.
        match self.value {
            ZoonValue::Number(Number::Float(f)) if f >= 0.0 => visitor.visit_u64(f as u64),
            ZoonValue::String(ref s) if s.trim().parse::<u64>().is_ok() => {
                visitor.visit_u64(s.trim().parse::<u64>().unwrap_or_default())
            }
            _ => {
                let wide = self.lenient_i64();
                let value = u64::try_from(wide).unwrap_or_else(|_| out_of_range(wide, "u64"));
                visitor.visit_u64(value)
            }
        }
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(self.lenient_f64())
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(self.lenient_f64())
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.into_lenient_string())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ZoonValue::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ZoonValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            other => {
                tracing::trace!(found = other.kind_name(), "reading non-array as empty sequence");
                visitor.visit_seq(SeqDeserializer::new(Vec::new()))
            }
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ZoonValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            other => {
                if !other.is_null() {
                    tracing::trace!(found = other.kind_name(), "reading non-record as empty map");
                }
                visitor.visit_map(MapDeserializer::new(ZoonMap::new()))
            }
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let record = match self.value {
            ZoonValue::Object(obj) => obj,
            other => {
                if !other.is_null() {
                    tracing::trace!(found = other.kind_name(), "reading non-record as empty struct");
                }
                ZoonMap::new()
            }
        };
        visitor.visit_map(MapDeserializer::new(fit_fields(record, fields)))
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ZoonValue::String(variant) => visitor.visit_enum(EnumDeserializer::new(variant, None)),
            ZoonValue::Object(obj) if obj.len() == 1 => {
                let mut entries = obj.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, Some(value)))
                    }
                    None => Err(Error::custom("expected a one-key record for enum")),
                }
            }
            _ => Err(self.mismatch("a string or one-key record for enum")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        i128 u128 bytes byte_buf
    }
}

/// Renames keys onto the struct's fields and fills absent fields with null.
///
/// A key matches a field exactly, or failing that ignoring ASCII case. When
/// two keys land on the same field, records merge and the later scalar wins.
fn fit_fields(map: ZoonMap, fields: &'static [&'static str]) -> ZoonMap {
    let mut out = ZoonMap::with_capacity(fields.len().max(map.len()));
    for (key, value) in map {
        let name = match resolve_field(&key, fields) {
            Some(field) => field.to_string(),
            None => key,
        };
        merge_field(&mut out, name, value);
    }
    for field in fields {
        if !out.contains_key(field) {
            out.insert((*field).to_string(), ZoonValue::Null);
        }
    }
    out
}

fn resolve_field(key: &str, fields: &'static [&'static str]) -> Option<&'static str> {
    fields
        .iter()
        .copied()
        .find(|field| *field == key)
        .or_else(|| {
            fields
                .iter()
                .copied()
                .find(|field| field.eq_ignore_ascii_case(key))
        })
}

fn merge_field(target: &mut ZoonMap, key: String, value: ZoonValue) {
    match value {
        ZoonValue::Object(incoming) => {
            if let Some(ZoonValue::Object(existing)) = target.get_mut(&key) {
                for (child_key, child) in incoming {
                    merge_field(existing, child_key, child);
                }
                return;
            }
            target.insert(key, ZoonValue::Object(incoming));
        }
        other => {
            target.insert(key, other);
        }
    }
}
