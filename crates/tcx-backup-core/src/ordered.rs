//! Insertion-ordered map primitive.
//!
//! The merge algorithm needs "first writer fixes the position, last writer
//! fixes the value" semantics. A general-purpose map would make that an
//! incidental property of its iteration order; this structure keeps the key
//! sequence explicit so the invariant is visible and testable.

use std::collections::HashMap;
use std::hash::Hash;

/// A map that remembers the order in which keys were first inserted.
///
/// Re-inserting an existing key replaces its value in place without moving
/// the key's position.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Keys in first-insertion order
    keys: Vec<K>,
    /// Key -> value lookup
    values: HashMap<K, V>,
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    /// Check if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Insert or replace a value.
    ///
    /// The first insert of a key establishes its position; later inserts of
    /// the same key overwrite the value in place. Returns the previous value
    /// if the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.values.contains_key(&key) {
            self.values.insert(key, value)
        } else {
            self.keys.push(key.clone());
            self.values.insert(key, value);
            None
        }
    }

    /// Get a mutable reference to the value for `key`, inserting the result
    /// of `default` first if the key is absent.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
            self.values.insert(key.clone(), default());
        }
        self.values
            .get_mut(&key)
            .expect("key inserted immediately above")
    }

    /// Iterate over entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys
            .iter()
            .filter_map(|k| self.values.get(k).map(|v| (k, v)))
    }

    /// Consume the map, yielding entries in first-insertion order.
    pub fn into_entries(mut self) -> Vec<(K, V)> {
        self.keys
            .into_iter()
            .filter_map(|k| {
                let v = self.values.remove(&k)?;
                Some((k, v))
            })
            .collect()
    }

    /// Consume the map, yielding values in first-insertion order.
    pub fn into_values_ordered(self) -> Vec<V> {
        self.into_entries().into_iter().map(|(_, v)| v).collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
