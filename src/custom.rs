//! Hand-written conversions between records and documents.
//!
//! Deriving `Serialize`/`Deserialize` maps fields to keys and nested records
//! to sections. Types that need another layout implement [`ToIni`] and
//! [`FromIni`] instead and work on a [`Document`] directly. Inside a derived
//! record, such a field is routed through these traits with
//! `#[serde(with = "serde_ini_doc::custom")]`; it then occupies the section
//! named after the field.
//!
//! ## Examples
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ini_doc::custom::{FromIni, ToIni};
//! use serde_ini_doc::{Container, Document, Error, Result};
//!
//! #[derive(Debug, PartialEq)]
//! struct Endpoint {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl ToIni for Endpoint {
//!     fn to_ini(&self, doc: &mut Document) -> Result<()> {
//!         doc.set("address", &format!("{}:{}", self.host, self.port));
//!         Ok(())
//!     }
//! }
//!
//! impl FromIni for Endpoint {
//!     fn from_ini(doc: &Document) -> Result<Self> {
//!         let address = doc.get("address");
//!         let (host, port) = address
//!             .rsplit_once(':')
//!             .ok_or_else(|| Error::conversion("address", address, "host:port", "missing `:`"))?;
//!         let port = port
//!             .parse()
//!             .map_err(|e| Error::conversion("address", address, "host:port", e))?;
//!         Ok(Endpoint { host: host.to_string(), port })
//!     }
//! }
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Config {
//!     name: String,
//!     #[serde(with = "serde_ini_doc::custom")]
//!     primary: Endpoint,
//! }
//!
//! let config = Config {
//!     name: "demo".to_string(),
//!     primary: Endpoint { host: "localhost".to_string(), port: 8080 },
//! };
//! let text = serde_ini_doc::to_string(&config).unwrap();
//! assert_eq!(text, "name=demo\n\n[primary]\naddress=localhost:8080\n");
//!
//! let back: Config = serde_ini_doc::from_str(&text).unwrap();
//! assert_eq!(back, config);
//! ```

use crate::{Document, IniOptions, Result};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

/// Writes a value into a document.
pub trait ToIni {
    fn to_ini(&self, doc: &mut Document) -> Result<()>;
}

/// Reads a value back from a document.
pub trait FromIni: Sized {
    fn from_ini(doc: &Document) -> Result<Self>;
}

impl ToIni for Document {
    fn to_ini(&self, doc: &mut Document) -> Result<()> {
        doc.clone_from(self);
        Ok(())
    }
}

impl FromIni for Document {
    fn from_ini(doc: &Document) -> Result<Self> {
        Ok(doc.clone())
    }
}

/// Builds a document through [`ToIni`].
pub fn to_document<T: ToIni + ?Sized>(value: &T) -> Result<Document> {
    let mut doc = Document::new();
    value.to_ini(&mut doc)?;
    Ok(doc)
}

/// Renders a value through [`ToIni`].
pub fn to_string<T: ToIni + ?Sized>(value: &T) -> Result<String> {
    Ok(to_document(value)?.to_string())
}

/// Renders a value through [`ToIni`] with the given options.
pub fn to_string_with_options<T: ToIni + ?Sized>(value: &T, options: &IniOptions) -> Result<String> {
    Ok(to_document(value)?.render(options))
}

/// Parses text and reads a value through [`FromIni`].
pub fn from_str<T: FromIni>(text: &str) -> Result<T> {
    T::from_ini(&Document::parse(text))
}

/// `serialize_with` adapter for fields implementing [`ToIni`].
pub fn serialize<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: ToIni,
    S: Serializer,
{
    let doc = to_document(value).map_err(ser::Error::custom)?;
    doc.serialize(serializer)
}

/// `deserialize_with` adapter for fields implementing [`FromIni`].
pub fn deserialize<'de, T, D>(deserializer: D) -> std::result::Result<T, D::Error>
where
    T: FromIni,
    D: Deserializer<'de>,
{
    let doc = Document::deserialize(deserializer)?;
    T::from_ini(&doc).map_err(de::Error::custom)
}
