//! Durable client-side key-value storage.
//!
//! The session token survives restarts by living in a flat string-keyed
//! store. This module provides:
//! - `KeyValueStore`: the capability the session manager depends on
//! - `MemoryStore`: process-local store for tests and throwaway runs
//! - `FileStore`: a JSON file in the user cache directory
//! - `KeyringStore`: the OS keychain via `keyring`

pub mod error;
pub mod file;
pub mod keychain;
pub mod memory;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use error::StorageError;
pub use file::FileStore;
pub use keychain::KeyringStore;
pub use memory::MemoryStore;

/// A flat string-keyed store scoped to one user.
///
/// Removing a key that is not present is not an error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Which storage backend holds the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" => Ok(Self::Keyring),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown storage backend '{}' (expected file, keyring or memory)",
                other
            )),
        }
    }
}

/// Open the configured backend. `dir` is only used by the file store.
pub fn open(backend: StorageBackend, dir: &Path) -> Arc<dyn KeyValueStore> {
    match backend {
        StorageBackend::File => Arc::new(FileStore::new(dir)),
        StorageBackend::Keyring => Arc::new(KeyringStore::default()),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("file".parse::<StorageBackend>(), Ok(StorageBackend::File));
        assert_eq!("KEYRING".parse::<StorageBackend>(), Ok(StorageBackend::Keyring));
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_backend_serde_is_lowercase() {
        let json = serde_json::to_string(&StorageBackend::Keyring).unwrap();
        assert_eq!(json, "\"keyring\"");
        let parsed: StorageBackend = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(parsed, StorageBackend::Memory);
    }

    #[test]
    fn test_open_file_backend_uses_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(StorageBackend::File, dir.path());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(dir.path().join(file::STORAGE_FILE).exists());
    }
}
