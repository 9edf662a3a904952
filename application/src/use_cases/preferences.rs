//! Preference Store use case: the persisted dark/light theme.

use crate::ports::storage::{KeyValueStorage, StorageError, THEME_KEY};
use askline_domain::Theme;
use std::sync::Arc;
use tracing::warn;

/// Reads and writes the theme preference under [`THEME_KEY`]
pub struct PreferenceStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl PreferenceStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Stored theme, or the default when absent, invalid or unreadable
    pub fn load_theme(&self) -> Theme {
        match self.storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Could not read theme preference: {}", e);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set(THEME_KEY, theme.as_str())
    }
}
