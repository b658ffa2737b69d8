//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionManager`: holds the bearer token and keeps it in sync with
//!   durable storage
//! - `Authenticator`: the endpoint that exchanges credentials for a token
//!
//! Tokens never expire client-side; the backend decides when to reject one.

pub mod authenticator;
pub mod error;
pub mod session;

pub use authenticator::Authenticator;
pub use error::AuthError;
pub use session::{SessionManager, TOKEN_KEY};
