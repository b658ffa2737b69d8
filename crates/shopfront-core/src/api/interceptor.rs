//! Per-request credential attachment.

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::RequestBuilder;

use super::ApiError;
use crate::auth::SessionManager;

/// Set `Authorization: Bearer <token>` when a token is present.
///
/// With no token the headers are left exactly as they were.
pub fn apply_bearer(headers: &mut HeaderMap, token: Option<&str>) -> Result<(), ApiError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(());
    };

    headers.insert(header::AUTHORIZATION, bearer_value(token)?);
    Ok(())
}

/// Encode `token` as a sensitive `Bearer` header value
pub fn bearer_value(token: &str) -> Result<HeaderValue, ApiError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ApiError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Decorates outgoing requests with the session's current token.
///
/// The token is read fresh for every request, so a login or logout takes
/// effect on the next call without rebuilding the client.
#[derive(Clone)]
pub struct CredentialInterceptor {
    session: Arc<SessionManager>,
}

impl CredentialInterceptor {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Headers to add to one outgoing request
    pub fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        apply_bearer(&mut headers, self.session.token().as_deref())?;
        Ok(headers)
    }

    pub fn decorate(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        Ok(request.headers(self.headers()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TOKEN_KEY;
    use crate::storage::MemoryStore;

    #[test]
    fn test_apply_bearer_with_token() {
        let mut headers = HeaderMap::new();
        apply_bearer(&mut headers, Some("T3")).unwrap();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer T3");
        assert!(headers.get(header::AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_apply_bearer_without_token_leaves_headers_alone() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        apply_bearer(&mut headers, None).unwrap();
        apply_bearer(&mut headers, Some("")).unwrap();

        assert!(headers.get(header::AUTHORIZATION).is_none());
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_apply_bearer_replaces_existing_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        apply_bearer(&mut headers, Some("T4")).unwrap();
        assert_eq!(headers.get_all(header::AUTHORIZATION).iter().count(), 1);
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer T4");
    }

    #[test]
    fn test_apply_bearer_rejects_unencodable_token() {
        let mut headers = HeaderMap::new();
        let err = apply_bearer(&mut headers, Some("bad\ntoken")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_bearer_value() {
        assert_eq!(bearer_value("T5").unwrap(), "Bearer T5");
        assert!(matches!(bearer_value("a\rb"), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_interceptor_follows_session_state() {
        let store = Arc::new(MemoryStore::with_entry(TOKEN_KEY, "T3"));
        let session = Arc::new(SessionManager::new(store));
        let interceptor = CredentialInterceptor::new(session.clone());

        assert!(interceptor.headers().unwrap().get(header::AUTHORIZATION).is_none());

        session.restore_from_durable_storage();
        assert_eq!(
            interceptor.headers().unwrap().get(header::AUTHORIZATION).unwrap(),
            "Bearer T3"
        );

        session.logout();
        assert!(interceptor.headers().unwrap().get(header::AUTHORIZATION).is_none());
    }
}
