//! Dynamic value tree for INI data.
//!
//! [`Value`] is the bridge between typed records and [`Document`]s. INI stores
//! nothing but strings, so the tree has three shapes only: a missing value,
//! a string, and a section holding more values. Dotted section names become
//! nested sections.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_ini_doc::{ini, Value};
//!
//! let text = Value::from("hello");
//! let number = Value::from(42);
//! assert_eq!(number.as_str(), Some("42"));
//!
//! let config = ini!({
//!     "name": "demo",
//!     "server": { "port": 8080 }
//! });
//! assert!(config.is_section());
//! ```
//!
//! ### Converting Documents
//!
//! ```rust
//! use serde_ini_doc::{Document, Value};
//!
//! let doc = Document::parse("a=b\n[s1]\nc=d\n[s1.inner]\ne=f\n");
//! let value = Value::from(&doc);
//!
//! let s1 = value.get("s1").unwrap();
//! assert_eq!(s1.get("c").and_then(Value::as_str), Some("d"));
//! assert_eq!(
//!     s1.get("inner").and_then(|v| v.get("e")).and_then(Value::as_str),
//!     Some("f")
//! );
//!
//! let back = Document::try_from(value).unwrap();
//! assert_eq!(back.section_names(true), vec!["s1", "s1.inner"]);
//! ```

use crate::container::Container;
use crate::{Document, Error, IniMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed INI value.
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::{IniMap, Value};
///
/// let null = Value::Null;
/// let text = Value::String("hello".to_string());
/// let section = Value::Section(IniMap::new());
///
/// assert!(null.is_null());
/// assert!(text.is_string());
/// assert!(section.is_section());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Value {
    /// No value; skipped when building a document.
    #[default]
    Null,
    String(String),
    Section(IniMap),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self, Value::Section(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_section(&self) -> Option<&IniMap> {
        match self {
            Value::Section(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a section.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_section().and_then(|map| map.get(key))
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Section(_) => "section",
        }
    }
}

impl fmt::Display for Value {
    /// Strings print as-is, sections print as INI text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Section(map) => {
                let mut doc = Document::new();
                fill_document(&mut doc, None, map.clone());
                fmt::Display::fmt(&doc, f)
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<IniMap> for Value {
    fn from(value: IniMap) -> Self {
        Value::Section(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::String(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(bool, char, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl From<&Document> for Value {
    /// Builds a section tree: top-level keys at the root, dotted section
    /// names split into nested sections. A section replaces a key of the
    /// same name.
    fn from(doc: &Document) -> Self {
        let mut root = IniMap::new();
        insert_keys(&mut root, doc.entries());

        for section in doc.sections() {
            let path: Vec<&str> = section.name().split('.').collect();
            insert_section(&mut root, &path, section.entries());
        }
        Value::Section(root)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::from(&doc)
    }
}

fn insert_section(map: &mut IniMap, path: &[&str], entries: &[crate::Entry]) {
    match path.split_first() {
        None => insert_keys(map, entries),
        Some((head, rest)) => {
            let slot = map.entry_or_null(head);
            if !slot.is_section() {
                *slot = Value::Section(IniMap::new());
            }
            if let Value::Section(inner) = slot {
                insert_section(inner, rest, entries);
            }
        }
    }
}

fn insert_keys(map: &mut IniMap, entries: &[crate::Entry]) {
    for entry in entries {
        if let crate::Entry::KeyValue { key, value, .. } = entry {
            if !map.get(key).is_some_and(Value::is_section) {
                map.insert(key.clone(), Value::String(value.clone()));
            }
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = Error;

    /// Builds a document from a section value. Strings become keys, nested
    /// sections become dotted sections and `Null` entries are skipped.
    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Section(map) => {
                let mut doc = Document::new();
                fill_document(&mut doc, None, map);
                Ok(doc)
            }
            Value::Null => Err(Error::NilRecord),
            other => Err(Error::not_a_record(other.kind())),
        }
    }
}

pub(crate) fn fill_document(doc: &mut Document, prefix: Option<&str>, map: IniMap) {
    let mut nested = Vec::new();
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => match prefix {
                Some(name) => doc.section(name).set(&key, &s),
                None => doc.set(&key, &s),
            },
            Value::Section(inner) => nested.push((key, inner)),
        }
    }
    for (key, inner) in nested {
        let name = match prefix {
            Some(parent) => format!("{parent}.{key}"),
            None => key,
        };
        doc.section(&name);
        fill_document(doc, Some(&name), inner);
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Section(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, a scalar or a map of INI values")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, _seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                Err(de::Error::invalid_type(de::Unexpected::Seq, &self))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = IniMap::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    values.insert(key, value);
                }
                Ok(Value::Section(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Serialize for Document {
    /// Serializes as a nested map, e.g. for JSON export.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Document::new()),
            value => Document::try_from(value).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_wins_over_key() {
        let doc = Document::parse("s=plain\n[s]\nk=v\n");
        let value = Value::from(&doc);
        assert!(value.get("s").is_some_and(Value::is_section));
    }

    #[test]
    fn test_key_does_not_replace_nested_section() {
        let mut doc = Document::new();
        doc.section("a.b").set("k", "v");
        doc.section("a").set("b", "plain");
        let value = Value::from(&doc);
        let b = value.get("a").and_then(|a| a.get("b"));
        assert!(b.is_some_and(Value::is_section));
    }

    #[test]
    fn test_null_is_skipped() {
        let mut map = IniMap::new();
        map.insert("gone".to_string(), Value::Null);
        map.insert("kept".to_string(), Value::from("x"));
        let doc = Document::try_from(Value::Section(map)).unwrap();
        assert_eq!(doc.keys(), vec!["kept"]);
    }

    #[test]
    fn test_non_section_is_rejected() {
        assert!(matches!(Document::try_from(Value::Null), Err(Error::NilRecord)));
        assert!(matches!(
            Document::try_from(Value::from("x")),
            Err(Error::NotARecord(_))
        ));
    }

    #[test]
    fn test_nested_sections_get_dotted_names() {
        let mut inner = IniMap::new();
        inner.insert("k".to_string(), Value::from("v"));
        let mut outer = IniMap::new();
        outer.insert("inner".to_string(), Value::Section(inner));
        let mut root = IniMap::new();
        root.insert("outer".to_string(), Value::Section(outer));

        let doc = Document::try_from(Value::Section(root)).unwrap();
        assert_eq!(doc.section_names(true), vec!["outer", "outer.inner"]);
        assert_eq!(doc.to_string(), "[outer.inner]\nk=v\n");
    }

    #[test]
    fn test_display_section_renders_ini() {
        let mut map = IniMap::new();
        map.insert("a".to_string(), Value::from(1));
        assert_eq!(Value::Section(map).to_string(), "a=1\n");
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_scalars_are_stringified() {
        assert_eq!(Value::from(true).as_str(), Some("true"));
        assert_eq!(Value::from(-3i64).as_str(), Some("-3"));
        assert_eq!(Value::from(2.5f64).as_str(), Some("2.5"));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }
}
