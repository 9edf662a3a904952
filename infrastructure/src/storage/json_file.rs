//! JSON file storage: one object mapping keys to string values.
//!
//! ```json
//! { "history": "[\"Hello world\"]", "theme": "dark" }
//! ```
//!
//! Every call reads or rewrites the whole file. Writes go to a sibling temp
//! file first and are renamed into place, so a crash mid-write leaves the
//! previous contents intact.
//!
//! Reading a file that is not a JSON object is an error, but writing over one
//! is not: the unreadable file is moved aside to `storage.json.corrupt` and
//! the write starts from an empty map.

use askline_application::{KeyValueStorage, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Application directory under the platform data dir
const APP_DIR: &str = "askline";
/// Storage file name
const FILE_NAME: &str = "storage.json";

/// [`KeyValueStorage`] backed by a single JSON file
pub struct JsonFileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Use the file at `path`; parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Default location: `$XDG_DATA_HOME/askline/storage.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR).join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let encoded = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Wrote {} keys to {}", map.len(), self.path.display());
        Ok(())
    }

    fn update<F>(&self, mutate: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Serialization(e)) => {
                self.quarantine(&e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        mutate(&mut map);
        self.write_map(&map)
    }

    /// Move an unparseable file out of the way so writes can proceed.
    fn quarantine(&self, cause: &serde_json::Error) {
        let backup = self.path.with_extension("json.corrupt");
        match fs::rename(&self.path, &backup) {
            Ok(()) => warn!(
                "Storage file {} is corrupt ({}); moved to {}",
                self.path.display(),
                cause,
                backup.display()
            ),
            Err(e) => warn!(
                "Storage file {} is corrupt ({}) and could not be moved aside: {}",
                self.path.display(),
                cause,
                e
            ),
        }
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|map| {
            map.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
