//! Core library for shopfront.
//!
//! Provides the session/auth-token lifecycle, durable token storage, the
//! REST client for the product-trial backend, and its data models.
//!
//! ```no_run
//! use std::sync::Arc;
//! use shopfront_core::{ApiClient, ApiConfig, MemoryStore, SessionManager};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionManager::new(Arc::new(MemoryStore::new())));
//! session.restore_from_durable_storage();
//!
//! let api = ApiClient::new(&ApiConfig::default(), session.clone())?;
//! if !session.is_authenticated() {
//!     api.login("u@example.com", "pw").await?;
//! }
//! let page = api.get_products(Default::default()).await?;
//! println!("{} products", page.total_elements);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;

pub use api::{ApiClient, ApiConfig, ApiError};
pub use auth::{AuthError, Authenticator, SessionManager, TOKEN_KEY};
pub use config::{Config, ConfigError};
pub use models::{Account, InventoryStatus, Page, PageRequest, Product, RegisterPayload};
pub use storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore, StorageBackend, StorageError};
