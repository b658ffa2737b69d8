use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::{AuthError, Authenticator};
use crate::api::bearer_value;
use crate::storage::KeyValueStore;

/// Storage key the token is persisted under
pub const TOKEN_KEY: &str = "auth.token";

/// A token is usable only if it can go out as an `Authorization` header
fn is_sendable(token: &str) -> bool {
    !token.trim().is_empty() && bearer_value(token).is_ok()
}

/// Single source of truth for "is someone logged in, and with what token".
///
/// The in-memory token and the durable entry are kept consistent by every
/// mutating operation: `login` writes both, `logout` clears both, and
/// `restore_from_durable_storage` only ever copies storage into memory.
/// Construct one per process and share it by `Arc`.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    token: RwLock<Option<String>>,
}

impl SessionManager {
    /// Create an unauthenticated session backed by `store`.
    /// Nothing is read from storage until `restore_from_durable_storage`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            token: RwLock::new(None),
        }
    }

    /// Whether a token is currently held in memory
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// The current bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.read().clone()
    }

    /// Authenticate against `endpoint` and persist the resulting token.
    ///
    /// The durable entry is written before memory is updated. If the
    /// endpoint fails or the write fails, neither memory nor storage changes.
    pub async fn login<A>(&self, endpoint: &A, identifier: &str, secret: &str) -> Result<(), AuthError>
    where
        A: Authenticator + ?Sized,
    {
        debug!(identifier, "Attempting login");
        let token = endpoint.authenticate(identifier, secret).await?;

        if !is_sendable(&token) {
            return Err(AuthError::Endpoint("token is empty or not header-safe".to_string()));
        }

        self.store.set(TOKEN_KEY, &token)?;
        *self.write() = Some(token);

        info!(identifier, "Logged in");
        Ok(())
    }

    /// Forget the token in memory and in storage. Never fails.
    pub fn logout(&self) {
        *self.write() = None;

        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove stored token");
        }
        info!("Logged out");
    }

    /// Load a previously persisted token into memory.
    ///
    /// Missing, unreadable, blank and corrupt entries all count as "not
    /// authenticated". Returns whether a token was restored.
    pub fn restore_from_durable_storage(&self) -> bool {
        let restored = match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if is_sendable(&token) => Some(token),
            Ok(Some(token)) if !token.trim().is_empty() => {
                warn!("Ignoring corrupt stored token");
                None
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable stored token");
                None
            }
        };

        let found = restored.is_some();
        *self.write() = restored;

        debug!(found, "Restored session from storage");
        found
    }

    // Poisoning cannot leave an Option<String> half-written
    fn read(&self) -> RwLockReadGuard<'_, Option<String>> {
        self.token.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<String>> {
        self.token.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
