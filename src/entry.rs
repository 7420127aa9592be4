//! Body entries of a document or section.
//!
//! A body is an ordered list of [`Entry`] values, one per line-equivalent unit
//! of the source text. Order is significant: it drives both output and
//! round-trip equality.

use crate::escape::{escape_comment, escape_key, escape_value};
use crate::IniOptions;
use std::fmt;

/// The character that introduces a comment.
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::Marker;
///
/// assert_eq!(Marker::Semicolon.as_char(), ';');
/// assert_eq!(Marker::from_char('#'), Some(Marker::Hash));
/// assert_eq!(Marker::from_char('x'), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Marker {
    #[default]
    Semicolon,
    Hash,
}

impl Marker {
    /// Returns the marker character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Marker::Semicolon => ';',
            Marker::Hash => '#',
        }
    }

    /// Maps `;` and `#` to their marker.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            ';' => Some(Marker::Semicolon),
            '#' => Some(Marker::Hash),
            _ => None,
        }
    }
}

/// One ordered unit of a document or section body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// `key=value`, optionally followed by an inline comment.
    KeyValue {
        key: String,
        value: String,
        comment: Option<String>,
    },
    /// A standalone comment block. `text` holds one line per physical comment line.
    Comment { text: String, marker: Marker },
    /// An empty line kept for round-trip fidelity.
    BlankLine,
}

impl Entry {
    pub(crate) fn key_value(key: &str, value: String) -> Self {
        Entry::KeyValue {
            key: key.to_string(),
            value,
            comment: None,
        }
    }

    /// Returns the key when this is a key-value entry.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Entry::KeyValue { key, .. } => Some(key),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(self, Entry::Comment { .. })
    }

    #[must_use]
    pub fn is_blank_line(&self) -> bool {
        matches!(self, Entry::BlankLine)
    }

    /// Appends the text form of this entry, including its trailing newline.
    pub fn write(&self, out: &mut String, options: &IniOptions) {
        match self {
            Entry::KeyValue {
                key,
                value,
                comment,
            } => {
                out.push_str(&escape_key(key));
                out.push('=');
                out.push_str(&escape_value(value));
                if let Some(comment) = comment {
                    out.push(' ');
                    out.push(options.field_comment_marker.as_char());
                    out.push(' ');
                    out.push_str(&escape_comment(comment));
                }
                out.push('\n');
            }
            Entry::Comment { text, marker } => write_comment_lines(out, text, *marker),
            Entry::BlankLine => out.push('\n'),
        }
    }
}

/// Writes `text` as one marker-prefixed line per embedded line.
pub(crate) fn write_comment_lines(out: &mut String, text: &str, marker: Marker) {
    for line in text.split('\n') {
        out.push(marker.as_char());
        if !line.is_empty() {
            out.push(' ');
            out.push_str(&escape_comment(line));
        }
        out.push('\n');
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write(&mut out, &IniOptions::default());
        f.write_str(&out)
    }
}
