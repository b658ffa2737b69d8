use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unexpected authentication response: {0}")]
    Endpoint(String),

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// True when the endpoint could not be reached at all
    pub fn is_network(&self) -> bool {
        matches!(self, AuthError::Network(_))
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::Endpoint(err.to_string())
        } else {
            AuthError::Network(err.to_string())
        }
    }
}
