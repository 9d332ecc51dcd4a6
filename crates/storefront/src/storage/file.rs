//! File-backed key-value store.
//!
//! All keys live in one JSON object. Every `set`/`remove` rewrites the whole
//! file (write to a sibling temp file, then rename) so a crash mid-write never
//! leaves a truncated store behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

/// A store persisted as a single JSON object file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file opens as an empty store. A file that exists but is not
    /// a JSON object of strings is logged and treated as empty; it is
    /// replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => {
                serde_json::from_str::<BTreeMap<String, String>>(&contents).unwrap_or_else(|e| {
                    warn!(path = %path.display(), error = %e, "Ignoring unreadable store file");
                    BTreeMap::new()
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        let previous = guard.insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist(&guard) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => guard.insert(key.to_string(), old),
                None => guard.remove(key),
            };
            return Err(e);
        }
        drop(guard);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut guard = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        let Some(previous) = guard.remove(key) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&guard) {
            guard.insert(key.to_string(), previous);
            return Err(e);
        }
        drop(guard);
        Ok(true)
    }
}
