//! API client for the dashboard backend session endpoint.
//!
//! # Usage
//!
//! ```rust,no_run
//! use folio_core::client::{ApiClient, ClientConfig};
//! use folio_core::SessionProvider;
//!
//! #[tokio::main]
//! async fn main() -> folio_core::Result<()> {
//!     let client = ApiClient::new(ClientConfig::default())?;
//!     let provider = SessionProvider::new(client);
//!     provider.mount();
//!     provider.settle().await;
//!     println!("{:?}", provider.current_session());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};
use crate::session::SessionService;
use crate::types::Session;

/// Default backend URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const CURRENT_USER_PATH: &str = "/api/v1/auth/user";
const LOGOUT_PATH: &str = "/api/v1/auth/logout";
const HEALTH_PATH: &str = "/health";

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (no trailing slash needed)
    pub base_url: String,
    /// Access token sent as a bearer token
    pub access_token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// API client for the dashboard backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API url must start with http:// or https://, got '{}'",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            token: config.access_token.filter(|t| !t.trim().is_empty()),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the backend is available
    pub async fn health(&self) -> Result<HealthResponse> {
        let resp = self.send(reqwest::Method::GET, HEALTH_PATH).await?;
        self.json(resp, HEALTH_PATH).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the current user. `None` when the backend reports no session.
    pub async fn get_current_user(&self) -> Result<Option<Session>> {
        let resp = self.send(reqwest::Method::GET, CURRENT_USER_PATH).await?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            debug!("Backend reports no session");
            return Ok(None);
        }
        self.json(resp, CURRENT_USER_PATH).await
    }

    /// Invalidate the current session on the backend
    pub async fn logout(&self) -> Result<()> {
        let resp = self.send(reqwest::Method::POST, LOGOUT_PATH).await?;
        let status = resp.status();
        if status.is_success() || status == reqwest::StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(Error::api(status.as_u16(), body))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HTTP Helpers
    // ─────────────────────────────────────────────────────────────────────────

    async fn send(&self, method: reqwest::Method, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("API request: {} {}", method, url);

        let mut req = self.client.request(method, &url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        req.send().await.map_err(|e| self.transport_error(e))
    }

    async fn json<T: DeserializeOwned>(&self, resp: reqwest::Response, path: &str) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            let bytes = resp.bytes().await.map_err(|e| self.transport_error(e))?;
            Ok(serde_json::from_slice(&bytes)?)
        } else if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(Error::Unauthorized)
        } else {
            let body = resp.text().await.unwrap_or_default();
            debug!("API error on {}: {} {}", path, status, body);
            Err(Error::api(status.as_u16(), body))
        }
    }

    /// Timeouts apply to the whole exchange, including reading the body.
    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout_secs)
        } else if e.is_decode() || e.is_body() {
            Error::Http(format!("Failed to read response: {}", e))
        } else {
            Error::Http(format!("{}. Is the backend running at {}?", e, self.base_url))
        }
    }
}

#[async_trait]
impl SessionService for ApiClient {
    async fn fetch_session(&self) -> Result<Option<Session>> {
        self.get_current_user().await
    }

    async fn invalidate_session(&self) -> Result<()> {
        self.logout().await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Health check response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}
