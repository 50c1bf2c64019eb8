//! Preference store implementations
//!
//! Durable user-preference flags (`muted`, `persona`, `open`). Read once
//! at startup, written on each change; a missing key falls back to the
//! configured default.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;

use shopvoice_core::{Error, PreferenceStore, Result};

/// In-memory store, the default for embedded and test use
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store for hosts with a writable data directory
pub struct FilePreferenceStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FilePreferenceStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A corrupt file is treated like an absent one: preferences are
    /// reset to defaults rather than blocking startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "corrupt preference file, resetting");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            values: RwLock::new(values),
        }
    }

    fn persist(&self) -> Result<()> {
        let snapshot = self.values.read().clone();
        let raw = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| Error::Preference(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| Error::Preference(e.to_string()))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        self.persist()
    }
}
