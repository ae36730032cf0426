//! In-memory store

use std::collections::HashMap;

use serde_json::Value;

use super::{KeyValueStore, StoreError};

/// Store backed by a plain map; nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a blob
    pub fn with_entry(key: &str, value: Value) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value);
        store
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_store_has_no_values() {
        let store = MemoryStore::new();
        assert!(store.get("anything").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut store = MemoryStore::new();
        store.set("key", json!(1)).unwrap();
        store.set("key", json!(2)).unwrap();

        assert_eq!(store.get("key"), Some(json!(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn seeded_entry_is_readable() {
        let store = MemoryStore::with_entry("key", json!("not a map"));
        assert_eq!(store.get("key"), Some(json!("not a map")));
    }
}
