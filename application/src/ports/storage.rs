//! Durable key-value storage port
//!
//! Abstracts the single storage partition the client persists into (query
//! history and theme preference). Operations are synchronous: each call
//! blocks only for one local read or write.

use std::collections::BTreeMap;
use std::sync::Mutex;
use thiserror::Error;

/// Key holding the JSON-encoded query history array
pub const HISTORY_KEY: &str = "history";
/// Key holding the theme preference string
pub const THEME_KEY: &str = "theme";

/// Errors that can occur while reading or writing durable storage
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage data is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-keyed, string-valued durable store
///
/// Implementations must write through before returning from a mutating call.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key` if present
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every key in the partition
    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local storage that forgets everything on exit.
///
/// Backs `--ephemeral` sessions and serves as the test double for
/// file-backed storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.lock()?.clear();
        Ok(())
    }
}
