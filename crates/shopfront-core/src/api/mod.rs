//! REST API client module for the product-trial backend.
//!
//! This module provides the `ApiClient` for logging in, registering
//! accounts and fetching products. Every outgoing request passes through
//! the credential interceptor, which attaches the session's bearer token
//! when one is held.

pub mod client;
pub mod error;
pub mod interceptor;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use interceptor::{apply_bearer, bearer_value, CredentialInterceptor};
