//! Operations shared by documents and sections.
//!
//! [`Container`] is implemented by [`Document`](crate::Document) (top-level
//! body) and [`Section`](crate::Section). Every method works on the ordered
//! entry list returned by [`Container::entries`].
//!
//! Keys are trimmed of surrounding spaces, tabs and carriage returns on every
//! call, the same way the parser reads them, so `" k"` and `"k"` name one entry.
//!
//! Lookups and mutations never fail: an absent key reads as `""`, and `set`
//! with an invalid key does nothing. Callers that need feedback check
//! [`is_key_valid`](crate::escape::is_key_valid) first. Only the typed getters
//! return errors, when a stored string cannot be converted.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini_doc::{Container, Document};
//!
//! let mut doc = Document::new();
//! doc.set("name", "  Alice  ");
//! doc.set_int("age", 30);
//! doc.set_field_comment("age", "in years");
//!
//! assert_eq!(doc.get("name"), "Alice");
//! assert_eq!(doc.get_int("age").unwrap(), 30);
//! assert_eq!(doc.get_comment("age"), "in years");
//! assert_eq!(doc.get("missing"), "");
//! ```

use crate::entry::{Entry, Marker};
use crate::escape::is_key_valid;
use crate::{Error, Result};
use std::str::FromStr;

/// A `(key, value)` pair as returned by [`Container::values`].
pub type FieldValue<'a> = (&'a str, &'a str);

/// The operation set of a document or section body.
pub trait Container {
    /// The ordered body entries.
    fn entries(&self) -> &[Entry];

    /// Mutable access to the ordered body entries.
    fn entries_mut(&mut self) -> &mut Vec<Entry>;

    /// Returns the value stored under `key`, or `""` when absent.
    fn get(&self, key: &str) -> &str {
        match find(self.entries(), key) {
            Some(Entry::KeyValue { value, .. }) => value,
            _ => "",
        }
    }

    /// Returns the value stored under `key`, or `default` when absent or empty.
    fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            "" => default,
            value => value,
        }
    }

    /// Returns `true` when a key-value entry with this key exists.
    fn contains_key(&self, key: &str) -> bool {
        find(self.entries(), key).is_some()
    }

    /// Reads `key` as a signed integer. Absent or empty reads as `0`.
    fn get_int(&self, key: &str) -> Result<i64> {
        parse_stored(key, self.get(key), "integer")
    }

    /// Reads `key` as an unsigned integer. Absent or empty reads as `0`.
    fn get_uint(&self, key: &str) -> Result<u64> {
        parse_stored(key, self.get(key), "unsigned integer")
    }

    /// Reads `key` as a float. Absent or empty reads as `0.0`.
    fn get_float(&self, key: &str) -> Result<f64> {
        parse_stored(key, self.get(key), "float")
    }

    /// Reads `key` as a boolean. Absent or empty reads as `false`.
    ///
    /// Accepts `1`, `t`, `T`, `true`, `TRUE`, `True` and their false counterparts.
    fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self.get(key);
        if value.is_empty() {
            return Ok(false);
        }
        parse_bool(value).ok_or_else(|| Error::conversion(key, value, "bool", "not a boolean"))
    }

    /// Stores `value` (trimmed of surrounding spaces) under `key`.
    ///
    /// An existing key is updated in place; a new key is appended. Invalid
    /// keys, including keys that are blank once trimmed, are ignored.
    fn set(&mut self, key: &str, value: &str) {
        let key = trim_key(key);
        if !is_key_valid(key) {
            tracing::trace!(key, "ignoring invalid key");
            return;
        }
        let value = value.trim_matches(' ');
        match find_mut(self.entries_mut(), key) {
            Some(Entry::KeyValue { value: stored, .. }) => {
                stored.clear();
                stored.push_str(value);
            }
            _ => self
                .entries_mut()
                .push(Entry::key_value(key, value.to_string())),
        }
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, &value.to_string());
    }

    fn set_uint(&mut self, key: &str, value: u64) {
        self.set(key, &value.to_string());
    }

    /// Stores the shortest decimal form that reads back as `value`.
    fn set_float(&mut self, key: &str, value: f64) {
        self.set(key, &value.to_string());
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }

    /// Removes the key-value entry for `key`, if any.
    fn del(&mut self, key: &str) {
        let entries = self.entries_mut();
        let key = trim_key(key);
        if let Some(index) = entries.iter().position(|e| e.key() == Some(key)) {
            entries.remove(index);
        }
    }

    /// Attaches an inline comment to an existing key. An empty text removes it.
    fn set_field_comment(&mut self, key: &str, text: &str) {
        if let Some(Entry::KeyValue { comment, .. }) = find_mut(self.entries_mut(), key) {
            *comment = (!text.is_empty()).then(|| text.to_string());
        }
    }

    /// Returns the inline comment of `key`, or `""`.
    fn get_comment(&self, key: &str) -> &str {
        match find(self.entries(), key) {
            Some(Entry::KeyValue {
                comment: Some(comment),
                ..
            }) => comment,
            _ => "",
        }
    }

    /// Appends a `;` comment line, joining it to a directly preceding `;` comment.
    fn add_comment(&mut self, text: &str) {
        push_comment(self.entries_mut(), text, Marker::Semicolon);
    }

    /// Appends a `#` comment line, joining it to a directly preceding `#` comment.
    fn add_hash_comment(&mut self, text: &str) {
        push_comment(self.entries_mut(), text, Marker::Hash);
    }

    fn add_white_line(&mut self) {
        self.entries_mut().push(Entry::BlankLine);
    }

    /// Keys of all key-value entries, in entry order.
    fn keys(&self) -> Vec<&str> {
        self.entries().iter().filter_map(Entry::key).collect()
    }

    /// All key-value pairs, in entry order.
    fn values(&self) -> Vec<FieldValue<'_>> {
        self.entries()
            .iter()
            .filter_map(|entry| match entry {
                Entry::KeyValue { key, value, .. } => Some((key.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Removes every blank-line entry.
    fn strip_white_lines(&mut self) {
        self.entries_mut().retain(|entry| !entry.is_blank_line());
    }
}

fn trim_key(key: &str) -> &str {
    key.trim_matches(|c| matches!(c, ' ' | '\t' | '\r'))
}

fn find<'a>(entries: &'a [Entry], key: &str) -> Option<&'a Entry> {
    let key = trim_key(key);
    entries.iter().find(|entry| entry.key() == Some(key))
}

fn find_mut<'a>(entries: &'a mut [Entry], key: &str) -> Option<&'a mut Entry> {
    let key = trim_key(key);
    entries.iter_mut().find(|entry| entry.key() == Some(key))
}

fn push_comment(entries: &mut Vec<Entry>, text: &str, marker: Marker) {
    if let Some(Entry::Comment {
        text: last,
        marker: last_marker,
    }) = entries.last_mut()
    {
        if *last_marker == marker {
            last.push('\n');
            last.push_str(text);
            return;
        }
    }
    entries.push(Entry::Comment {
        text: text.to_string(),
        marker,
    });
}

fn parse_stored<T>(key: &str, value: &str, expected: &'static str) -> Result<T>
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    if value.is_empty() {
        return Ok(T::default());
    }
    value
        .parse()
        .map_err(|e| Error::conversion(key, value, expected, e))
}

/// Parses the boolean spellings accepted by typed getters.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    #[test]
    fn test_set_updates_in_place() {
        let mut doc = Document::new();
        doc.set("a", "1");
        doc.set("b", "2");
        doc.set("a", "3");
        assert_eq!(doc.values(), vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_set_ignores_invalid_keys() {
        let mut doc = Document::new();
        doc.set("", "x");
        doc.set("bad?", "x");
        doc.set("(paren)", "x");
        assert!(doc.keys().is_empty());
    }

    #[test]
    fn test_set_trims_spaces_only() {
        let mut doc = Document::new();
        doc.set("k", "  padded\t ");
        assert_eq!(doc.get("k"), "padded\t");
    }

    #[test]
    fn test_keys_are_trimmed() {
        let mut doc = Document::new();
        doc.set(" k\t", "v");
        doc.set("\tk ", "w");
        doc.set(" \t", "blank");
        assert_eq!(doc.values(), vec![("k", "w")]);
        assert_eq!(doc.get(" k"), "w");
        assert!(doc.contains_key("k\r"));

        doc.set_field_comment("  k", "note");
        assert_eq!(doc.get_comment("k"), "note");
        doc.del(" k ");
        assert!(doc.keys().is_empty());
    }

    #[test]
    fn test_typed_setters_and_getters() {
        let mut doc = Document::new();
        doc.set_int("i", -999);
        doc.set_uint("u", 18_446_744_073_709_551_615);
        doc.set_float("f", 4.2069);
        doc.set_bool("b", true);

        assert_eq!(doc.get("i"), "-999");
        assert_eq!(doc.get("f"), "4.2069");
        assert_eq!(doc.get("b"), "true");
        assert_eq!(doc.get_int("i").unwrap(), -999);
        assert_eq!(doc.get_uint("u").unwrap(), u64::MAX);
        assert_eq!(doc.get_float("f").unwrap(), 4.2069);
        assert!(doc.get_bool("b").unwrap());
    }

    #[test]
    fn test_typed_getters_absent_is_zero() {
        let doc = Document::new();
        assert_eq!(doc.get_int("x").unwrap(), 0);
        assert_eq!(doc.get_uint("x").unwrap(), 0);
        assert_eq!(doc.get_float("x").unwrap(), 0.0);
        assert!(!doc.get_bool("x").unwrap());
    }

    #[test]
    fn test_typed_getters_malformed_is_error() {
        let mut doc = Document::new();
        doc.set("word", "abc");
        assert!(doc.get_int("word").unwrap_err().is_conversion());
        assert!(doc.get_uint("word").unwrap_err().is_conversion());
        assert!(doc.get_float("word").unwrap_err().is_conversion());
        assert!(doc.get_bool("word").unwrap_err().is_conversion());

        doc.set("neg", "-1");
        assert!(doc.get_uint("neg").is_err());
    }

    #[test]
    fn test_bool_spellings() {
        let mut doc = Document::new();
        doc.set("yes", "T");
        doc.set("no", "0");
        assert!(doc.get_bool("yes").unwrap());
        assert!(!doc.get_bool("no").unwrap());
    }

    #[test]
    fn test_get_or_and_contains_key() {
        let mut doc = Document::new();
        doc.set("present", "v");
        doc.set("empty", "");
        assert_eq!(doc.get_or("present", "d"), "v");
        assert_eq!(doc.get_or("empty", "d"), "d");
        assert_eq!(doc.get_or("absent", "d"), "d");
        assert!(doc.contains_key("empty"));
        assert!(!doc.contains_key("absent"));
    }

    #[test]
    fn test_del_removes_only_first_match() {
        let mut doc = Document::new();
        doc.set("a", "1");
        doc.add_comment("note");
        doc.set("b", "2");
        doc.del("a");
        doc.del("nothing");
        assert_eq!(doc.keys(), vec!["b"]);
        assert_eq!(doc.entries().len(), 2);
    }

    #[test]
    fn test_field_comments() {
        let mut doc = Document::new();
        doc.set_field_comment("ghost", "ignored");
        assert!(doc.entries().is_empty());

        doc.set("k", "v");
        doc.set_field_comment("k", "first");
        doc.set_field_comment("k", "second");
        assert_eq!(doc.get_comment("k"), "second");

        doc.set_field_comment("k", "");
        assert_eq!(doc.get_comment("k"), "");
    }

    #[test]
    fn test_consecutive_comments_coalesce_by_marker() {
        let mut doc = Document::new();
        doc.add_comment("one");
        doc.add_comment("two");
        doc.add_hash_comment("three");
        doc.add_hash_comment("four");
        doc.add_comment("five");

        assert_eq!(
            doc.entries(),
            &[
                Entry::Comment {
                    text: "one\ntwo".to_string(),
                    marker: Marker::Semicolon
                },
                Entry::Comment {
                    text: "three\nfour".to_string(),
                    marker: Marker::Hash
                },
                Entry::Comment {
                    text: "five".to_string(),
                    marker: Marker::Semicolon
                },
            ]
        );
    }

    #[test]
    fn test_white_lines() {
        let mut doc = Document::new();
        doc.add_white_line();
        doc.set("k", "v");
        doc.add_white_line();
        doc.strip_white_lines();
        assert_eq!(doc.entries().len(), 1);
    }
}
