//! Data models for the product-trial backend.
//!
//! - `Product`, `InventoryStatus`: catalogue entries
//! - `Page`, `PageRequest`: the pagination envelope and its query
//! - `RegisterPayload`, `Account`: account creation
//! - `ErrorBody`: the backend's error envelope

pub mod account;
pub mod error_body;
pub mod page;
pub mod product;

pub use account::{Account, RegisterPayload};
pub use error_body::ErrorBody;
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use product::{InventoryStatus, Product};
