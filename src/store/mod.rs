//! Durable key-value persistence
//!
//! Progress data lives behind a tiny port so the tracker can run against an
//! on-disk JSON file in the binary and an in-memory map in tests.

pub mod file;
pub mod memory;

use serde_json::Value;
use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Key holding the module-progress map
pub const PROGRESS_KEY: &str = "ucp-hub-progress";

/// Key holding the last-visit timestamp (epoch milliseconds)
pub const LAST_VISIT_KEY: &str = "ucp-hub-last-visit";

/// Errors raised while writing to a store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key to JSON blob storage that survives between runs
///
/// Reads are infallible: a missing or unreadable blob is simply absent.
pub trait KeyValueStore {
    /// Fetch the blob stored under `key`
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous blob
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}
