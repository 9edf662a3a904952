//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Path to the storage file (default: platform data dir)
    pub path: Option<String>,
    /// Keep history and preferences in memory only
    pub ephemeral: bool,
}

impl FileStorageConfig {
    /// Configured path with a leading `~/` expanded
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let raw = self.path.as_deref()?;
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }
}
