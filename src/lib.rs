//! # serde_ini_doc
//!
//! A round-trip preserving INI document model with Serde support.
//!
//! ## What it does
//!
//! INI text is parsed into a [`Document`] that remembers everything needed to
//! write it back: key order, inline and standalone comments (`;` or `#`),
//! blank lines and the comment block above each section header. Documents
//! can be edited in place and rendered again, or mapped to and from typed
//! records through Serde.
//!
//! ## Key Features
//!
//! - **Lossless editing**: untouched parts of a file render exactly as they were read
//! - **Dotted sections**: `[server.tls]` is addressable as a child of `[server]`
//! - **Forgiving parser**: malformed lines are skipped, parsing never fails
//! - **Serde Compatible**: structs map to keys, nested structs to sections
//! - **Hot reload**: optional file watching behind the `watch` feature
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_ini_doc = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Editing a Document
//!
//! ```rust
//! use serde_ini_doc::{Container, Document};
//!
//! let text = "; service settings\n\
//!             name=demo\n\
//!             \n\
//!             [server]\n\
//!             port=8080 ; default\n";
//!
//! let mut doc = Document::parse(text);
//! assert_eq!(doc.to_string(), text);
//!
//! let mut server = doc.section("server");
//! assert_eq!(server.get_int("port").unwrap(), 8080);
//! server.set_int("port", 9090);
//! server.set("host", "0.0.0.0");
//!
//! assert_eq!(
//!     doc.to_string(),
//!     "; service settings\nname=demo\n\n[server]\nport=9090 ; default\nhost=0.0.0.0\n"
//! );
//! ```
//!
//! ### Typed Records
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ini_doc::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     verbose: bool,
//!     user: User,
//! }
//!
//! let config = Config {
//!     verbose: true,
//!     user: User { name: "Brian".to_string(), age: 100 },
//! };
//!
//! let text = to_string(&config).unwrap();
//! assert_eq!(text, "verbose=true\n\n[user]\nname=Brian\nage=100\n");
//!
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(back, config);
//! ```
//!
//! ## Text Format
//!
//! - `key=value`, optionally followed by `; comment` or `# comment`
//! - `;`, `#`, newlines and backslashes inside values are escaped as `\;`,
//!   `\#`, `\N` and `\\`
//! - `; text` or `# text` on its own line is a standalone comment; consecutive
//!   lines with the same marker form one block
//! - `[a.b]` opens section `a.b`; a comment block right above it belongs to it
//! - keys may not contain any of `? { } | & ~ ! [ ( ) ^` or a newline
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Typed records to and from INI text
//! - **`document_editing.rs`** - Reading, editing and writing a document
//! - **`macro.rs`** - Building values with the ini! macro
//! - **`custom_conversion.rs`** - Hand-written `ToIni`/`FromIni` layouts
//! - **`custom_options.rs`** - Output formatting options
//! - **`watch.rs`** - Reloading a file as it changes (feature `watch`)
//!
//! Run any example with: `cargo run --example <name>`

pub mod container;
pub mod custom;
pub mod de;
pub mod document;
pub mod entry;
pub mod error;
pub mod escape;
pub mod fs;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod section;
pub mod ser;
pub mod value;
#[cfg(feature = "watch")]
pub mod watch;

pub use container::Container;
pub use de::Deserializer;
pub use document::Document;
pub use entry::{Entry, Marker};
pub use error::{Error, Result};
pub use fs::{load, load_with_options};
pub use map::IniMap;
pub use options::IniOptions;
pub use parser::parse_with_options;
pub use section::{Section, SectionMut};
pub use ser::ValueSerializer;
pub use value::Value;
#[cfg(feature = "watch")]
pub use watch::{watch, WatchedDocument};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses INI text into a document.
///
/// Parsing never fails; see [`Document::parse`].
#[must_use]
pub fn parse(text: &str) -> Document {
    Document::parse(text)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.get("x"), Some(&Value::from("1")));
/// ```
///
/// # Errors
///
/// Returns an error for sequences, tuples and bytes, which have no INI form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Convert a record or map into a [`Document`].
///
/// Fields become keys, nested records and maps become sections named by
/// their dotted path, and `None` fields are left out.
///
/// # Errors
///
/// Returns [`Error::NilRecord`] for `None`/unit, [`Error::NotARecord`] for
/// scalars, and [`Error::UnsupportedType`] for sequences.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_document<T>(value: &T) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    Document::try_from(to_value(value)?)
}

/// Serialize a record or map to an INI string.
///
/// # Errors
///
/// Same as [`to_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &IniOptions::default())
}

/// Serialize a record or map to an INI string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::{to_string_with_options, IniOptions};
/// use std::collections::BTreeMap;
///
/// let mut limits = BTreeMap::new();
/// limits.insert("cpu", 2);
/// let mut config = BTreeMap::new();
/// config.insert("limits", limits);
///
/// let text = to_string_with_options(&config, &IniOptions::compact()).unwrap();
/// assert_eq!(text, "[limits]\ncpu=2\n");
/// ```
///
/// # Errors
///
/// Same as [`to_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &IniOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_document(value)?.render(options))
}

/// Serialize a record or map to a writer in INI format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns a conversion error when a stored string does not parse as the
/// field's type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(value))
}

/// Deserialize an instance of type `T` from a document.
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::{from_document, Document};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let doc = Document::parse("x=1\ny=2\n");
/// let point: Point = from_document(&doc).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Same as [`from_value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_document<T>(doc: &Document) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_document(doc))
}

/// Deserialize an instance of type `T` from INI text.
///
/// # Errors
///
/// Same as [`from_value`]. Malformed lines are skipped rather than reported.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_document(&Document::parse(s))
}

/// Deserialize an instance of type `T` from INI text with custom options.
///
/// # Errors
///
/// Same as [`from_value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &IniOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_document(&parse_with_options(s, options))
}

/// Deserialize an instance of type `T` from an I/O stream of INI text.
///
/// # Errors
///
/// Returns an error if reading from the reader fails or the data cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    from_str(&text)
}

/// Deserialize an instance of type `T` from bytes of INI text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}
