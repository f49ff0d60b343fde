//! Serialization into the [`ZoonValue`] tree.
//!
//! Encoding is two-phase: any `T: Serialize` is first turned into a
//! [`ZoonValue`] by [`ZoonValueSerializer`], and the tree is then written as
//! text by [`encode_document`](crate::encode_document). The tabular encoder
//! needs every row before it can choose column types, so there is no
//! streaming text serializer.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_zoon::{ZoonValue, ZoonValueSerializer};
//!
//! #[derive(Serialize)]
//! struct Port {
//!     number: u16,
//!     open: bool,
//! }
//!
//! let value = Port { number: 22, open: true }
//!     .serialize(ZoonValueSerializer)
//!     .unwrap();
//! assert_eq!(value.pointer("open"), Some(&ZoonValue::Bool(true)));
//! ```
//!
//! Struct fields keep declaration order. Map entries are sorted by key so
//! that `HashMap` input encodes deterministically.

use crate::{Error, Number, Result, ZoonMap, ZoonValue};
use serde::{ser, Serialize};

/// Serializer producing a [`ZoonValue`].
pub struct ZoonValueSerializer;

pub struct SerializeVec {
    vec: Vec<ZoonValue>,
}

pub struct SerializeMap {
    map: ZoonMap,
    current_key: Option<String>,
    sort_on_end: bool,
}

impl ser::Serializer for ZoonValueSerializer {
    type Ok = ZoonValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<ZoonValue> {
        Ok(ZoonValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<ZoonValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<ZoonValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<ZoonValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<ZoonValue> {
        Ok(ZoonValue::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<ZoonValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<ZoonValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<ZoonValue> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<ZoonValue> {
        match i64::try_from(v) {
            Ok(i) => Ok(ZoonValue::Number(Number::Integer(i))),
            Err(_) => Ok(ZoonValue::Number(Number::Float(v as f64))),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<ZoonValue> {
        // Widen through the shortest decimal form so 0.1f32 stays 0.1.
        let widened = v.to_string().parse::<f64>().unwrap_or(f64::from(v));
        Ok(ZoonValue::Number(Number::Float(widened)))
    }

    fn serialize_f64(self, v: f64) -> Result<ZoonValue> {
        Ok(ZoonValue::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<ZoonValue> {
        Ok(ZoonValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<ZoonValue> {
        Ok(ZoonValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<ZoonValue> {
        let vec = v.iter().map(|&b| ZoonValue::from(b)).collect();
        Ok(ZoonValue::Array(vec))
    }

    fn serialize_none(self) -> Result<ZoonValue> {
        Ok(ZoonValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<ZoonValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<ZoonValue> {
        Ok(ZoonValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<ZoonValue> {
        Ok(ZoonValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<ZoonValue> {
        Ok(ZoonValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<ZoonValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<ZoonValue>
    where
        T: ?Sized + Serialize,
    {
        let mut map = ZoonMap::with_capacity(1);
        map.insert(variant.to_string(), to_zoon_value(value)?);
        Ok(ZoonValue::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::unsupported_type(&format!(
            "tuple variant {}::{}",
            name, variant
        )))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(true))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(false))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Err(Error::unsupported_type(&format!(
            "struct variant {}::{}",
            name, variant
        )))
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(sort_on_end: bool) -> Self {
        SerializeMap {
            map: ZoonMap::new(),
            current_key: None,
            sort_on_end,
        }
    }

    fn finish(mut self) -> ZoonValue {
        if self.sort_on_end {
            self.map.sort_keys();
        }
        ZoonValue::Object(self.map)
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = ZoonValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_zoon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZoonValue> {
        Ok(ZoonValue::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = ZoonValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<ZoonValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = ZoonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<ZoonValue> {
        ser::SerializeSeq::end(self)
    }
}

// Never constructed: serialize_tuple_variant always fails.
impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = ZoonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<ZoonValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = ZoonValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_zoon_value(key)? {
            ZoonValue::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::map_key(other.kind_name())),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_zoon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZoonValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = ZoonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_zoon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZoonValue> {
        Ok(self.finish())
    }
}

// Never constructed: serialize_struct_variant always fails.
impl ser::SerializeStructVariant for SerializeMap {
    type Ok = ZoonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<ZoonValue> {
        Ok(self.finish())
    }
}

fn to_zoon_value<T: Serialize + ?Sized>(value: &T) -> Result<ZoonValue> {
    value.serialize(ZoonValueSerializer)
}
