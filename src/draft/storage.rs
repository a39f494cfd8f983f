// ABOUTME: Key-value storage backends for draft persistence
// File-backed store for the app, in-memory store for tests

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write storage file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize storage contents: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage is unavailable")]
    Unavailable,
}

/// Flat string key-value store, the shape browser local storage has.
/// Implementations must not panic; callers treat every failure as
/// "drafts are unavailable" and carry on.
pub trait StorageBackend: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str);
    fn keys(&self) -> Vec<String>;
}

/// Store backed by a single JSON file of key-value pairs. The whole map is
/// held in memory and rewritten on every mutation; draft payloads are small
/// and writes are debounced upstream.
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Open the store at `path`, loading existing entries. A missing file is
    /// an empty store; an unreadable or corrupt file is logged and treated
    /// as empty rather than failing the app.
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Draft storage at {} is corrupt, starting empty: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!("Cannot read draft storage at {}: {}", path.display(), e);
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let raw = serde_json::to_string(&self.entries)?;
        fs::write(&self.path, raw).map_err(|source| StorageError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            if let Err(e) = self.flush() {
                warn!("Failed to persist draft removal: {}", e);
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// In-memory store for tests and for running with persistence disabled.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Store that refuses every write, standing in for quota-exceeded or
/// disabled storage.
#[derive(Debug, Default)]
pub struct UnavailableStorage;

impl StorageBackend for UnavailableStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&mut self, _key: &str) {}

    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drafts.json");

        let mut storage = FileStorage::open(path.clone());
        storage.set("a", "1").unwrap();
        storage.set("b", "2").unwrap();
        storage.remove("a");

        // Reopen from disk
        let reopened = FileStorage::open(path);
        assert_eq!(reopened.get("b").as_deref(), Some("2"));
        assert_eq!(reopened.get("a"), None);
        assert_eq!(reopened.keys(), vec!["b".to_string()]);
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::open(dir.path().join("nope.json"));
        assert!(storage.keys().is_empty());
    }

    #[test]
    fn test_file_storage_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drafts.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::open(path);
        assert!(storage.keys().is_empty());
    }

    #[test]
    fn test_unavailable_storage_rejects_writes() {
        let mut storage = UnavailableStorage;
        assert!(storage.set("k", "v").is_err());
        assert_eq!(storage.get("k"), None);
    }
}
