//! Error types for INI documents and typed-record marshaling.
//!
//! Parsing never fails: malformed lines are dropped and the scan carries on.
//! The errors in this module come from the layers built on top of the
//! document model:
//!
//! ## Error Categories
//!
//! - **Conversion Errors**: A stored string could not be read as the requested type
//!   (`get_int`, `get_bool`, typed record fields, ...)
//! - **Marshal Errors**: The value handed to the marshaler has no INI shape
//!   (not a record, `None`, sequences, ...)
//! - **I/O Errors**: File reading/writing failures, passed through unchanged
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini_doc::{Container, Document};
//!
//! let doc = Document::parse("port=eighty\n");
//! let err = doc.get_int("port").unwrap_err();
//! assert!(err.is_conversion());
//! assert!(err.to_string().contains("port"));
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A stored value could not be converted to the requested type
    #[error("Cannot read key `{key}` as {expected}: {value:?} ({reason})")]
    Conversion {
        key: String,
        value: String,
        expected: &'static str,
        reason: String,
    },

    /// `save` was given a path it cannot write to
    #[error("Invalid file path: {0:?}")]
    InvalidPath(PathBuf),

    /// The marshaled value is not a struct or map
    #[error("Given value is not a record: {0}")]
    NotARecord(String),

    /// The marshaled value is `None` or unit
    #[error("Given record is nil")]
    NilRecord,

    /// Value kind without an INI representation
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// File watcher failure
    #[cfg(feature = "watch")]
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

impl Error {
    /// Creates a conversion error for the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini_doc::Error;
    ///
    /// let err = Error::conversion("port", "eighty", "integer", "invalid digit found in string");
    /// assert!(err.to_string().contains("integer"));
    /// ```
    pub fn conversion<R: fmt::Display>(
        key: &str,
        value: &str,
        expected: &'static str,
        reason: R,
    ) -> Self {
        Error::Conversion {
            key: key.to_string(),
            value: value.to_string(),
            expected,
            reason: reason.to_string(),
        }
    }

    /// Creates an error for a marshal target that is not a record.
    pub fn not_a_record(found: &str) -> Self {
        Error::NotARecord(found.to_string())
    }

    /// Creates an unsupported type error for values that have no INI form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini_doc::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` for errors raised while converting a stored string.
    #[must_use]
    pub fn is_conversion(&self) -> bool {
        matches!(self, Error::Conversion { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
