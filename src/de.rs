//! Deserialization of typed records from [`Value`] trees.
//!
//! This module provides the [`Deserializer`] behind
//! [`from_document`](crate::from_document) and [`from_str`](crate::from_str).
//!
//! ## Overview
//!
//! Every INI value is a string, so scalars are parsed on demand from the
//! requested type:
//!
//! - **Numbers**: parsed with `FromStr`; an empty string reads as zero
//! - **Booleans**: `1`, `t`, `true`, ... and `0`, `f`, `false`, ...; empty is `false`
//! - **Sections**: read as structs or maps
//! - **Enums**: a string names a unit variant, a single-key section a
//!   newtype or struct variant
//!
//! Conversion failures name the dotted path of the offending key.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_ini_doc::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { name: String, server: Server }
//!
//! let config: Config = from_str("name=demo\n[server]\nhost=localhost\nport=8080\n").unwrap();
//! assert_eq!(config.server.port, 8080);
//!
//! let err = from_str::<Config>("name=demo\n[server]\nhost=h\nport=http\n").unwrap_err();
//! assert!(err.to_string().contains("server.port"));
//! ```

use crate::container::parse_bool;
use crate::{Document, Error, IniMap, Result, Value};
use serde::de;
use std::fmt;
use std::str::FromStr;

/// Deserializer reading from a [`Value`].
pub struct Deserializer {
    value: Value,
    path: String,
}

impl Deserializer {
    /// Creates a deserializer over a value tree.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Deserializer {
            value,
            path: String::new(),
        }
    }

    /// Creates a deserializer over the contents of a document.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        Self::new(Value::from(doc))
    }

    fn child(parent: &str, key: &str, value: Value) -> Self {
        let path = if parent.is_empty() {
            key.to_string()
        } else {
            format!("{parent}.{key}")
        };
        Deserializer { value, path }
    }

    fn parse_scalar<T>(self, expected: &'static str) -> Result<T>
    where
        T: FromStr + Default,
        T::Err: fmt::Display,
    {
        match self.value {
            Value::Null => Ok(T::default()),
            Value::String(s) if s.is_empty() => Ok(T::default()),
            Value::String(s) => s
                .parse()
                .map_err(|e| Error::conversion(&self.path, &s, expected, e)),
            Value::Section(_) => Err(Error::conversion(
                &self.path,
                "",
                expected,
                "found a section",
            )),
        }
    }

    fn parse_bool(self) -> Result<bool> {
        match self.value {
            Value::Null => Ok(false),
            Value::String(s) if s.is_empty() => Ok(false),
            Value::String(s) => parse_bool(&s)
                .ok_or_else(|| Error::conversion(&self.path, &s, "bool", "not a boolean")),
            Value::Section(_) => Err(Error::conversion(
                &self.path,
                "",
                "bool",
                "found a section",
            )),
        }
    }

    fn into_string(self) -> Result<String> {
        match self.value {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s),
            Value::Section(_) => Err(Error::conversion(
                &self.path,
                "",
                "string",
                "found a section",
            )),
        }
    }

    fn into_map(self) -> Result<MapDeserializer> {
        match self.value {
            Value::Section(map) => Ok(MapDeserializer::new(map, self.path)),
            Value::Null => Ok(MapDeserializer::new(IniMap::new(), self.path)),
            Value::String(s) => Err(Error::conversion(
                &self.path,
                &s,
                "section",
                "found a plain value",
            )),
        }
    }

    /// Like [`into_map`](Self::into_map), but every field missing from the
    /// section reads as `Null`, so absent keys and sections take their zero value.
    fn into_record(self, fields: &'static [&'static str]) -> Result<MapDeserializer> {
        match self.value {
            Value::Section(map) => Ok(MapDeserializer::new(with_fields(map, fields), self.path)),
            Value::Null => Ok(MapDeserializer::new(
                with_fields(IniMap::new(), fields),
                self.path,
            )),
            Value::String(s) => Err(Error::conversion(
                &self.path,
                &s,
                "section",
                "found a plain value",
            )),
        }
    }
}

fn with_fields(mut map: IniMap, fields: &[&str]) -> IniMap {
    for field in fields {
        if !map.contains_key(field) {
            map.insert((*field).to_string(), Value::Null);
        }
    }
    map
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident: $ty:ty, $expected:literal;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse_scalar::<$ty>($expected)?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::String(s) => visitor.visit_string(s),
            Value::Section(map) => visitor.visit_map(MapDeserializer::new(map, self.path)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(self.parse_bool()?)
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8: i8, "integer";
        deserialize_i16 => visit_i16: i16, "integer";
        deserialize_i32 => visit_i32: i32, "integer";
        deserialize_i64 => visit_i64: i64, "integer";
        deserialize_i128 => visit_i128: i128, "integer";
        deserialize_u8 => visit_u8: u8, "unsigned integer";
        deserialize_u16 => visit_u16: u16, "unsigned integer";
        deserialize_u32 => visit_u32: u32, "unsigned integer";
        deserialize_u64 => visit_u64: u64, "unsigned integer";
        deserialize_u128 => visit_u128: u128, "unsigned integer";
        deserialize_f32 => visit_f32: f32, "float";
        deserialize_f64 => visit_f64: f64, "float";
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let path = self.path.clone();
        let s = self.into_string()?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::conversion(&path, &s, "char", "expected a single character")),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.into_string()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.into_string()?)
    }

    fn deserialize_bytes<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("bytes"))
    }

    fn deserialize_byte_buf<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("bytes"))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
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

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("sequences"))
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("tuples"))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("tuple structs"))
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(self.into_map()?)
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
        visitor.visit_map(self.into_record(fields)?)
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
            Value::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: None,
                path: self.path,
            }),
            Value::Section(map) if map.len() == 1 => {
                let mut iter = map.into_iter();
                match iter.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                        path: self.path,
                    }),
                    None => Err(Error::custom("expected an enum variant")),
                }
            }
            other => Err(Error::custom(format!(
                "expected an enum variant at `{}`, found {}",
                self.path,
                other.kind()
            ))),
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
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    path: String,
    current: Option<(String, Value)>,
}

impl MapDeserializer {
    fn new(map: IniMap, path: String) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            path,
            current: None,
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
                let key_de = Deserializer::child(&self.path, &key, Value::String(key.clone()));
                self.current = Some((key, value));
                seed.deserialize(key_de).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.current.take() {
            Some((key, value)) => seed.deserialize(Deserializer::child(&self.path, &key, value)),
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
    value: Option<Value>,
    path: String,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant_de = Deserializer {
            value: Value::String(self.variant.clone()),
            path: self.path.clone(),
        };
        let variant = seed.deserialize(variant_de)?;
        let path = if self.value.is_some() {
            Deserializer::child(&self.path, &self.variant, Value::Null).path
        } else {
            self.path
        };
        Ok((
            variant,
            VariantDeserializer {
                value: self.value,
                path,
            },
        ))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
    path: String,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            Some(_) => Err(Error::custom("expected a unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(Deserializer {
                value,
                path: self.path,
            }),
            None => Err(Error::custom("expected a newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Section(map)) => {
                visitor.visit_map(MapDeserializer::new(with_fields(map, fields), self.path))
            }
            _ => Err(Error::custom("expected a struct variant")),
        }
    }
}
