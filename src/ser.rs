//! Serialization of typed records into [`Value`] trees.
//!
//! This module provides [`ValueSerializer`], the serde `Serializer` behind
//! [`to_value`](crate::to_value), [`to_document`](crate::to_document) and
//! [`to_string`](crate::to_string).
//!
//! ## Mapping
//!
//! - **Scalars**: numbers, booleans and chars become their display string
//! - **Structs and maps**: become sections, one key per field or entry
//! - **`None` and unit**: become `Null` and are left out of the document
//! - **Enums**: unit variants become their name, newtype and struct variants
//!   a section with a single key named after the variant
//! - **Sequences, tuples and bytes**: unsupported, INI has no list form
//!
//! ## Usage
//!
//! ```rust
//! use serde::Serialize;
//! use serde_ini_doc::to_string;
//!
//! #[derive(Serialize)]
//! struct User { name: String, age: u32 }
//!
//! #[derive(Serialize)]
//! struct Config { k: String, user: User }
//!
//! let config = Config {
//!     k: "foobar".to_string(),
//!     user: User { name: "Brian".to_string(), age: 100 },
//! };
//! assert_eq!(to_string(&config).unwrap(), "k=foobar\n\n[user]\nname=Brian\nage=100\n");
//! ```

use crate::{Error, IniMap, Result, Value};
use serde::ser::Impossible;
use serde::{ser, Serialize};

/// Serializer producing a [`Value`].
pub struct ValueSerializer;

pub struct SerializeMap {
    map: IniMap,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: IniMap,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = Impossible<Value, Error>;
    type SerializeTuple = Impossible<Value, Error>;
    type SerializeTupleStruct = Impossible<Value, Error>;
    type SerializeTupleVariant = Impossible<Value, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    // Formatted as f32 so that 0.1 stays `0.1`.
    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Value> {
        Err(Error::unsupported_type("bytes"))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
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
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = IniMap::with_capacity(1);
        map.insert(variant.to_string(), to_value(value)?);
        Ok(Value::Section(map))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_type("sequences"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_type("tuples"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type("tuple structs"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: IniMap::with_capacity(len),
        })
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: IniMap::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::custom(format!(
                "map keys must be strings or scalars, found {}",
                other.kind()
            ))),
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
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Section(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Section(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut outer = IniMap::with_capacity(1);
        outer.insert(self.variant.to_string(), Value::Section(self.map));
        Ok(Value::Section(outer))
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Flags {
        verbose: bool,
        level: Option<u8>,
    }

    #[derive(Serialize)]
    enum Mode {
        Fast,
        Limited(u32),
        Custom { depth: u8 },
    }

    #[test]
    fn test_scalars_become_strings() {
        assert_eq!(to_value(&42u16).unwrap(), Value::from("42"));
        assert_eq!(to_value(&-7i64).unwrap(), Value::from("-7"));
        assert_eq!(to_value(&false).unwrap(), Value::from("false"));
        assert_eq!(to_value(&'x').unwrap(), Value::from("x"));
    }

    #[test]
    fn test_f32_uses_shortest_form() {
        assert_eq!(to_value(&0.1f32).unwrap(), Value::from("0.1"));
        assert_eq!(to_value(&420.69f64).unwrap(), Value::from("420.69"));
    }

    #[test]
    fn test_none_is_null() {
        let value = to_value(&Flags {
            verbose: true,
            level: None,
        })
        .unwrap();
        assert_eq!(value.get("verbose"), Some(&Value::from("true")));
        assert_eq!(value.get("level"), Some(&Value::Null));
    }

    #[test]
    fn test_map_with_integer_keys() {
        let mut map = BTreeMap::new();
        map.insert(2, "two");
        map.insert(1, "one");
        let value = to_value(&map).unwrap();
        let keys: Vec<_> = value.as_section().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["1", "2"]);
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_value(&Mode::Fast).unwrap(), Value::from("Fast"));

        let limited = to_value(&Mode::Limited(5)).unwrap();
        assert_eq!(limited.get("Limited"), Some(&Value::from("5")));

        let custom = to_value(&Mode::Custom { depth: 3 }).unwrap();
        let depth = custom.get("Custom").and_then(|v| v.get("depth"));
        assert_eq!(depth, Some(&Value::from("3")));
    }

    #[test]
    fn test_sequences_are_unsupported() {
        assert!(matches!(
            to_value(&vec![1, 2, 3]),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(to_value(&(1, 2)), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_section_map_keys_must_be_scalars() {
        #[derive(Serialize, PartialEq, Eq, PartialOrd, Ord)]
        struct Key {
            id: u8,
        }
        let mut map = BTreeMap::new();
        map.insert(Key { id: 1 }, "x");
        assert!(to_value(&map).is_err());
    }
}
