//! The key-value mapping behind the global store and every scope.

use std::collections::hash_map::{self, HashMap};

use crate::Value;

/// Keys are plain strings.
pub type Key = String;

/// A mutable key to value mapping.
///
/// A store owns its entries outright. Cloning a store deep-copies every
/// pair, which is how a new scope gets its isolated snapshot.
///
/// # Example
///
/// ```
/// use transact::{Store, Value};
///
/// let mut store = Store::new();
/// store.set("a", Value::Integer(1));
/// store.set("b", Value::Integer(1));
///
/// assert_eq!(store.get("a"), Some(&Value::Integer(1)));
/// assert_eq!(store.count(&Value::Integer(1)), 2);
/// assert!(store.delete("a"));
/// assert!(!store.delete("a"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    data: HashMap<Key, Value>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self { data: HashMap::new() }
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Inserts or overwrites the value stored under `key`.
    pub fn set(&mut self, key: impl Into<Key>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// Removes `key`, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.data.remove(key).is_some()
    }

    /// Counts the keys whose value equals `value`.
    ///
    /// This is a full scan over the store.
    pub fn count(&self, value: &Value) -> usize {
        self.data.values().filter(|v| *v == value).count()
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over all pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consumes the store, yielding every pair in unspecified order.
    pub fn into_entries(self) -> hash_map::IntoIter<Key, Value> {
        self.data.into_iter()
    }
}

impl From<HashMap<Key, Value>> for Store {
    fn from(data: HashMap<Key, Value>) -> Self {
        Self { data }
    }
}

impl FromIterator<(Key, Value)> for Store {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self { data: iter.into_iter().collect() }
    }
}
