//! JSON file key-value store.
//!
//! All records live in one JSON object (`{"key": "value", ...}`) rewritten
//! on every save — write-through, matching the engine's persistence
//! contract. Load failures degrade to an empty map so the engine falls
//! back to its defaults instead of refusing to start.

use chatpro_application::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// File-backed store, one JSON object per file.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open (or create) the store at the given path.
    ///
    /// Creates parent directories as needed. An unreadable or corrupt file
    /// is logged and treated as empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(
                    "Could not create store directory {}: {}",
                    parent.display(),
                    e
                );
            }
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(
                        "Corrupt store file {}, starting empty: {}",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>, key: &str) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(entries).map_err(|e| StoreError::SaveFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        fs::write(&self.path, blob).map_err(|e| StoreError::SaveFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        // The in-memory entry stays even when the disk write fails; the
        // caller logs the error and keeps going.
        self.flush(&entries, key)
    }
}
