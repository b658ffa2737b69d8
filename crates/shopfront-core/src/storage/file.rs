use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Storage file name inside the store directory
pub const STORAGE_FILE: &str = "storage.json";

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a single JSON object on disk.
///
/// Every operation re-reads the file, so edits made by another process are
/// picked up on the next call. A missing file is an empty store. A corrupt
/// file fails `get`, and is replaced wholesale by the next `set`.
pub struct FileStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE)
    }

    fn load(&self) -> Result<Entries, StorageError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Entries::new());
        }

        let contents =
            std::fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&contents)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)))
    }

    fn save(&self, entries: &Entries) -> Result<(), StorageError> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&path, contents).map_err(|e| StorageError::io(&path, e))?;
        debug!(path = %path.display(), entries = entries.len(), "Saved storage file");
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut Entries) -> bool) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(reason)) => {
                debug!(%reason, "Discarding corrupt storage file");
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        if f(&mut entries) {
            self.save(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.path().exists() {
            return Ok(());
        }
        self.modify(|entries| entries.remove(key).is_some())
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").field("dir", &self.dir).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get("auth.token").unwrap(), None);
        assert!(store.remove("auth.token").is_ok());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_creates_directories_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join("a").join("b");

        FileStore::new(&store_dir).set("auth.token", "T1").unwrap();

        // A second instance sees the same data
        let reopened = FileStore::new(&store_dir);
        assert_eq!(reopened.get("auth.token").unwrap().as_deref(), Some("T1"));
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("auth.token", "T1").unwrap();
        store.set("theme", "dark").unwrap();

        store.remove("auth.token").unwrap();
        assert_eq!(store.get("auth.token").unwrap(), None);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_fails_get_and_is_replaced_by_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.get("auth.token"), Err(StorageError::Corrupt(_))));

        store.set("auth.token", "T2").unwrap();
        assert_eq!(store.get("auth.token").unwrap().as_deref(), Some("T2"));
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.get("auth.token").unwrap(), None);
    }
}
