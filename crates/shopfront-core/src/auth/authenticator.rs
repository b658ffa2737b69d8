use async_trait::async_trait;

use super::AuthError;

/// Exchanges an identifier and secret for a session token.
///
/// Implementations report transport failures as `AuthError::Network` and
/// rejected credentials as `AuthError::InvalidCredentials`. No retry is
/// expected.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<String, AuthError>;
}
