//! Ordered map type for ZOON records.
//!
//! [`ZoonMap`] wraps an [`IndexMap`] so that record fields keep the order in
//! which they were produced. Struct fields therefore encode in declaration
//! order, while maps are sorted by key before they are stored.
//!
//! ## Examples
//!
//! ```rust
//! use serde_zoon::{ZoonMap, ZoonValue};
//!
//! let mut map = ZoonMap::new();
//! map.insert("name".to_string(), ZoonValue::from("Alice"));
//! map.insert("age".to_string(), ZoonValue::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::ZoonValue;
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to ZOON values.
///
/// # Examples
///
/// ```rust
/// use serde_zoon::{ZoonMap, ZoonValue};
///
/// let mut map = ZoonMap::new();
/// map.insert("second".to_string(), ZoonValue::from(2));
/// map.insert("first".to_string(), ZoonValue::from(1));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["second", "first"]);
///
/// map.sort_keys();
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ZoonMap(IndexMap<String, ZoonValue>);

impl ZoonMap {
    #[must_use]
    pub fn new() -> Self {
        ZoonMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ZoonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// An existing key keeps its position and the old value is returned.
    pub fn insert(&mut self, key: String, value: ZoonValue) -> Option<ZoonValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ZoonValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ZoonValue> {
        self.0.get_mut(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<ZoonValue> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Gets the entry for `key` for in-place manipulation.
    pub fn entry(&mut self, key: String) -> Entry<'_, String, ZoonValue> {
        self.0.entry(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorts the entries by key, ascending.
    pub fn sort_keys(&mut self) {
        self.0.sort_keys();
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, ZoonValue> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, ZoonValue> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ZoonValue> {
        self.0.iter()
    }
}

impl From<HashMap<String, ZoonValue>> for ZoonMap {
    fn from(map: HashMap<String, ZoonValue>) -> Self {
        let mut map: ZoonMap = map.into_iter().collect();
        map.sort_keys();
        map
    }
}

impl From<ZoonMap> for HashMap<String, ZoonValue> {
    fn from(map: ZoonMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for ZoonMap {
    type Item = (String, ZoonValue);
    type IntoIter = indexmap::map::IntoIter<String, ZoonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ZoonMap {
    type Item = (&'a String, &'a ZoonValue);
    type IntoIter = indexmap::map::Iter<'a, String, ZoonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, ZoonValue)> for ZoonMap {
    fn from_iter<T: IntoIterator<Item = (String, ZoonValue)>>(iter: T) -> Self {
        ZoonMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut map = ZoonMap::new();
        map.insert("b".to_string(), ZoonValue::from(1));
        map.insert("a".to_string(), ZoonValue::from(2));
        assert!(map.insert("b".to_string(), ZoonValue::from(3)).is_some());

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![("b", ZoonValue::from(3)), ("a", ZoonValue::from(2))]
        );
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map: ZoonMap = ["x", "y", "z"]
            .iter()
            .map(|k| (k.to_string(), ZoonValue::Null))
            .collect();
        map.remove("y");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "z"]);
        assert!(!map.contains_key("y"));
    }

    #[test]
    fn test_from_hashmap_is_sorted() {
        let mut source = HashMap::new();
        source.insert("zeta".to_string(), ZoonValue::from(1));
        source.insert("alpha".to_string(), ZoonValue::from(2));
        let map = ZoonMap::from(source);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
    }
}
