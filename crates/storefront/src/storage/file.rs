//! JSON-file-backed storage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{KeyValueStorage, StorageError};

/// Storage backed by a single JSON object file.
///
/// The whole map is loaded on open and rewritten on every mutation, mirroring
/// the synchronous blocking semantics of browser local storage. Two processes
/// pointed at the same file will overwrite each other's writes
/// (last-write-wins, unguarded).
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStorage {
    /// Open (or create) the storage file at `path`.
    ///
    /// A missing file starts empty. A file that exists but does not parse as
    /// a JSON string map is treated as empty too - persisted state is never
    /// worth failing startup over - but a warning is logged so the corruption
    /// is visible.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists and cannot be read at all.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "discarding corrupt storage file");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(super::poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(super::poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(super::poisoned)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set("user", "{\"id\":\"1\"}").unwrap();
        storage.set("cart_guest", "[]").unwrap();

        // Reopen from disk and verify both keys survived.
        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get("user").unwrap().as_deref(),
            Some("{\"id\":\"1\"}")
        );
        assert_eq!(reopened.get("cart_guest").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set("user", "x").unwrap();
        storage.remove("user").unwrap();

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert!(reopened.get("user").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json at all{").unwrap();

        let storage = JsonFileStorage::open(&path).unwrap();
        assert!(storage.get("user").unwrap().is_none());
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::open(dir.path().join("absent.json")).unwrap();
        assert!(storage.get("anything").unwrap().is_none());
    }
}
