use super::KeyValueStorage;

use crate::error::StorageError;
use crate::fs::{read_optional, write_atomic};

use common::ErrorLocation;

use std::collections::BTreeMap;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Mutex;

use log::{debug, warn};

/// JSON-object file storage with atomic replace-on-write.
///
/// A missing file reads as empty. A file that is not a JSON object of
/// strings is reported as [`StorageError::Corrupt`].
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[track_caller]
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = read_optional(&self.path).map_err(|e| StorageError::Read {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        let Some(contents) = contents.filter(|c| !c.trim().is_empty()) else {
            debug!("Storage file {} absent or empty", self.path.display());
            return Ok(BTreeMap::new());
        };

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    #[track_caller]
    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(entries).map_err(|e| StorageError::Corrupt {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        write_atomic(&self.path, &json).map_err(|e| StorageError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })
    }

    /// Current entries for a read-modify-write cycle. A corrupt file starts
    /// over from an empty map; the flag tells the caller to rewrite it.
    fn entries_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.read_all() {
            Ok(entries) => Ok((entries, false)),
            Err(e @ StorageError::Corrupt { .. }) => {
                warn!("Replacing unreadable storage file: {}", e);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock();
        let (mut entries, _) = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock();
        let (mut entries, replace_corrupt) = self.entries_for_write()?;
        if entries.remove(key).is_none() && !replace_corrupt {
            return Ok(());
        }
        self.write_all(&entries)
    }
}
