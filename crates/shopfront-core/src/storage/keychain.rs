use keyring::Entry;

use super::{KeyValueStore, StorageError};

/// Keychain service name entries are filed under
pub const SERVICE_NAME: &str = "shopfront";

/// Stores each key as its own entry in the OS keychain.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        Ok(Entry::new(&self.service, key)?)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME)
    }
}

impl KeyValueStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entry(key)?.set_password(value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_name() {
        assert_eq!(KeyringStore::default().service(), SERVICE_NAME);
        assert_eq!(KeyringStore::new("other").service(), "other");
    }

    #[test]
    fn test_value_survives_a_new_store() {
        let service = format!("shopfront-test-{}", std::process::id());
        let store = KeyringStore::new(&service);

        // Headless CI has no secret service to talk to
        if store.set("token", "T9").is_err() {
            eprintln!("Skipping: no OS keychain available");
            return;
        }

        assert_eq!(store.get("token").unwrap().as_deref(), Some("T9"));
        assert_eq!(
            KeyringStore::new(&service).get("token").unwrap().as_deref(),
            Some("T9")
        );

        store.remove("token").unwrap();
        assert_eq!(KeyringStore::new(&service).get("token").unwrap(), None);
    }
}
