//! History Store use case.
//!
//! Keeps the list of past queries in memory and writes every change through
//! to [`KeyValueStorage`] under [`HISTORY_KEY`].
//!
//! Writes update the in-memory list first. If persisting fails the caller gets
//! a [`StorageError`], but the session keeps the change, so a broken or full
//! disk only costs durability, never the current session's history. The next
//! mutation writes the whole list again, even if it changes nothing itself.

use crate::ports::storage::{HISTORY_KEY, KeyValueStorage, StorageError};
use askline_domain::{HistoryList, QueryRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// Normalized, deduplicated, persisted query history
pub struct HistoryStore {
    storage: Arc<dyn KeyValueStorage>,
    entries: HistoryList,
    // Storage lags behind `entries` after a failed write.
    dirty: bool,
}

impl HistoryStore {
    /// Load the persisted history.
    ///
    /// A missing key yields an empty list. Corrupt data or an unreadable
    /// backend is logged and also treated as empty.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let entries = match storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<HistoryList>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    warn!("Ignoring corrupt query history: {}", e);
                    HistoryList::new()
                }
            },
            Ok(None) => HistoryList::new(),
            Err(e) => {
                warn!("Could not read query history: {}", e);
                HistoryList::new()
            }
        };
        debug!("Loaded {} history entries", entries.len());

        Self {
            storage,
            entries,
            dirty: false,
        }
    }

    /// Current in-memory history
    pub fn entries(&self) -> &HistoryList {
        &self.entries
    }

    /// Normalize `query`, append it unless already present, and persist.
    ///
    /// Blank input is ignored and nothing is written.
    pub fn add(&mut self, query: &str) -> Result<HistoryList, StorageError> {
        let Ok(record) = QueryRecord::normalize(query) else {
            return Ok(self.entries.clone());
        };

        if self.entries.push(record) || self.dirty {
            self.persist()?;
        }
        Ok(self.entries.clone())
    }

    /// Remove every entry exactly equal to `query` and persist.
    pub fn remove(&mut self, query: &str) -> Result<HistoryList, StorageError> {
        let removed = self.entries.remove(query);
        debug!("Removed {} history entries", removed);
        self.persist()?;
        Ok(self.entries.clone())
    }

    /// Erase the history key (and only that key).
    pub fn clear(&mut self) -> Result<HistoryList, StorageError> {
        self.entries.clear();
        let result = self.storage.remove(HISTORY_KEY);
        self.dirty = result.is_err();
        result?;
        Ok(HistoryList::new())
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.entries)?;
        let result = self.storage.set(HISTORY_KEY, &encoded);
        self.dirty = result.is_err();
        result
    }
}
