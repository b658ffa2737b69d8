//! API client for communicating with the product-trial REST backend.
//!
//! This module provides the `ApiClient` struct for authenticating,
//! registering accounts and fetching product data.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ApiError, CredentialInterceptor};
use crate::auth::{AuthError, Authenticator, SessionManager};
use crate::models::{Account, Page, PageRequest, Product, RegisterPayload};

// ============================================================================
// Constants
// ============================================================================

/// Default backend location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP request timeout in seconds.
/// Also bounds login, which would otherwise hang on an unresponsive backend.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Connection settings for `ApiClient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// API client for the product-trial backend.
/// Clone is cheap - reqwest::Client and the session are both shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    interceptor: CredentialInterceptor,
}

impl ApiClient {
    /// Create a new API client whose requests carry `session`'s token
    pub fn new(config: &ApiConfig, session: Arc<SessionManager>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            interceptor: CredentialInterceptor::new(session),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        self.interceptor.session()
    }

    /// Log in through this client's own `/token` endpoint
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.session().login(self, email, password).await
    }

    pub fn logout(&self) {
        self.session().logout();
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn base_request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(%method, url = %url, "Sending request");
        self.client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    /// Build a request with credentials attached
    fn request(&self, method: reqwest::Method, path: &str) -> Result<RequestBuilder, ApiError> {
        self.interceptor.decorate(self.base_request(method, path))
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(reqwest::Method::GET, path)?.send().await?;
        let response = Self::check_response(response).await?;
        Self::parse(response, path).await
    }

    async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .request(reqwest::Method::GET, path)?
            .query(query)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        Self::parse(response, path).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self
            .request(reqwest::Method::POST, path)?
            .json(body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        Self::parse(response, path).await
    }

    // ===== Account =====

    /// Create a new account. Does not log in.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<Account, ApiError> {
        debug!(username = %payload.username, "Registering account");
        self.post("/account", payload).await
    }

    // ===== Products =====

    /// Fetch one page of the product catalogue
    pub async fn get_products(&self, request: PageRequest) -> Result<Page<Product>, ApiError> {
        if !request.is_valid() {
            return Err(ApiError::InvalidPageSize(request.size));
        }
        self.get_with_query("/products", &request).await
    }

    /// Fetch a single product by id
    pub async fn get_product(&self, id: i64) -> Result<Product, ApiError> {
        if id <= 0 {
            return Err(ApiError::InvalidId(id));
        }
        self.get(&format!("/products/{}", id)).await
    }
}

#[async_trait]
impl Authenticator for ApiClient {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<String, AuthError> {
        let body = LoginRequest {
            email: identifier,
            password: secret,
        };

        // A token that cannot be encoded must not block getting a new one
        let request = match self.interceptor.headers() {
            Ok(headers) => self.base_request(reqwest::Method::POST, "/token").headers(headers),
            Err(e) => {
                warn!(error = %e, "Sending login without the current token");
                self.base_request(reqwest::Method::POST, "/token")
            }
        };
        let response = request.json(&body).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::Endpoint(ApiError::from_status(status, &text).to_string()));
        }

        let text = response.text().await?;
        let parsed: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| AuthError::Endpoint(format!("Failed to parse auth response: {}", e)))?;

        if parsed.token.trim().is_empty() {
            return Err(AuthError::Endpoint("empty token".to_string()));
        }
        Ok(parsed.token)
    }
}
