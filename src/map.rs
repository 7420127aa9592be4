//! Ordered map type for section values.
//!
//! This module provides [`IniMap`], a wrapper around [`IndexMap`] that keeps
//! keys in insertion order. Order matters here because it becomes the key
//! order of the rendered document.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini_doc::{IniMap, Value};
//!
//! let mut map = IniMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("age").and_then(|v| v.as_str()), Some("30"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to values.
///
/// # Examples
///
/// ```rust
/// use serde_ini_doc::{IniMap, Value};
///
/// let mut map = IniMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IniMap(IndexMap<String, crate::Value>);

impl IniMap {
    #[must_use]
    pub fn new() -> Self {
        IniMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        IniMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// An existing key keeps its position and the old value is returned.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::Value> {
        self.0.get_mut(key)
    }

    /// Returns the value under `key`, inserting `Null` first when absent.
    pub fn entry_or_null(&mut self, key: &str) -> &mut crate::Value {
        self.0.entry(key.to_string()).or_default()
    }

    /// Removes `key`, shifting later keys down to keep their order.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for IniMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        IniMap(map.into_iter().collect())
    }
}

impl From<IniMap> for HashMap<String, crate::Value> {
    fn from(map: IniMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for IniMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a IniMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for IniMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        IniMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = IniMap::new();
        map.insert("a".to_string(), Value::from("1"));
        map.insert("b".to_string(), Value::from("2"));
        assert!(map.insert("a".to_string(), Value::from("3")).is_some());

        let pairs: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("a", Some("3")), ("b", Some("2"))]);
    }

    #[test]
    fn test_remove_shifts() {
        let mut map: IniMap = [("a", "1"), ("b", "2"), ("c", "3")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect();
        map.remove("a");
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_entry_or_null() {
        let mut map = IniMap::new();
        assert!(map.entry_or_null("x").is_null());
        *map.entry_or_null("x") = Value::from("set");
        assert_eq!(map.get("x").and_then(Value::as_str), Some("set"));
    }
}
