//! JSON file store
//!
//! The whole key space is kept in a single JSON object on disk and rewritten
//! on every `set`. Writers in other processes are not coordinated with; the
//! last write wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{KeyValueStore, StoreError};

/// Store persisted to one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Location of the backing file
    path: PathBuf,

    /// Current contents
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`
    ///
    /// A missing file gives an empty store. An unreadable or malformed file is
    /// logged and also treated as empty; it is overwritten on the next `set`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read_entries(&path);
        Self { path, entries }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Map<String, Value> {
        if !path.exists() {
            return Map::new();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read store {:?}: {}", path, e);
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!("Store {:?} is not a JSON object, starting empty", path);
                Map::new()
            }
            Err(e) => {
                tracing::warn!("Failed to parse store {:?}: {}", path, e);
                Map::new()
            }
        }
    }

    /// Write the current contents to disk
    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents)?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.save()
    }
}
