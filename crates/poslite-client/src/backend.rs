//! # Backend Handle
//!
//! HTTP client creation and configuration for the POS Lite REST backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Backend Connection                                 │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientConfig::new(base_url) ← Configure timeouts, user agent          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Backend::new(config) ← Build reqwest::Client with a cookie store      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  backend.products() / .customers() / .sales() / .reports() ...         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET|POST|PUT|DELETE {base_url}/api/{path}                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Envelope::parse ← success flag decides Ok / Rejected                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session Cookies
//! The backend authenticates with a session cookie. The client keeps a
//! cookie jar for its whole lifetime, so a session established by the backend
//! is replayed on every later call. Clones share the jar.

use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::envelope::Envelope;
use crate::error::{ClientError, ClientResult};
use crate::repository::report::ReportRepository;
use crate::repository::resource::ResourceRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::settings::SettingsRepository;
use poslite_core::{Customer, Expense, Product};

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

// =============================================================================
// Configuration
// =============================================================================

/// Backend client configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use poslite_client::ClientConfig;
///
/// let config = ClientConfig::new("http://pos.local:5000")
///     .timeout(Duration::from_secs(15));
/// assert_eq!(config.timeout, Some(Duration::from_secs(15)));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and optional prefix; `/api/...` is appended.
    pub base_url: String,

    /// Whole-request timeout.
    /// Default: none (a hung request simply leaves the view stale)
    pub timeout: Option<Duration>,

    /// TCP connect timeout.
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// Sent as `User-Agent`.
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            timeout: None,
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("poslite/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new(DEFAULT_BASE_URL)
    }
}

// =============================================================================
// Backend
// =============================================================================

/// Main backend handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let backend = Backend::new(ClientConfig::new("http://127.0.0.1:5000"))?;
/// let products = backend.products().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Backend {
    http: reqwest::Client,
    base_url: String,
}

impl Backend {
    /// Creates a backend handle.
    ///
    /// ## Returns
    /// * `Ok(Backend)` - Ready to use (no request is made yet)
    /// * `Err(ClientError::Config)` - Base URL is not an http(s) URL, or the
    ///   HTTP client could not be built
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        info!(base_url = %base_url, "Backend client ready");

        Ok(Backend { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -------------------------------------------------------------------------
    // Repositories
    // -------------------------------------------------------------------------

    /// Returns the settings repository.
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.clone())
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = backend.products().list().await?;
    /// ```
    pub fn products(&self) -> ResourceRepository<Product> {
        ResourceRepository::new(self.clone())
    }

    pub fn customers(&self) -> ResourceRepository<Customer> {
        ResourceRepository::new(self.clone())
    }

    pub fn expenses(&self) -> ResourceRepository<Expense> {
        ResourceRepository::new(self.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.clone())
    }

    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.clone())
    }

    /// Checks whether the backend answers an authenticated read.
    pub async fn health_check(&self) -> bool {
        self.get("settings").await.is_ok()
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    pub(crate) async fn get(&self, path: &str) -> ClientResult<Envelope> {
        debug!(method = "GET", path = %path, "Backend request");
        self.execute(self.http.get(self.url(path))).await
    }

    pub(crate) async fn send<B>(&self, method: Method, path: &str, body: &B) -> ClientResult<Envelope>
    where
        B: Serialize + ?Sized,
    {
        debug!(method = %method, path = %path, "Backend request");
        self.execute(self.http.request(method, self.url(path)).json(body))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> ClientResult<Envelope> {
        debug!(method = "DELETE", path = %path, "Backend request");
        self.execute(self.http.delete(self.url(path))).await
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<Envelope> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        let envelope = Envelope::parse(status, &body);
        if let Err(err) = &envelope {
            warn!(status = status, error = %err, "Backend call failed");
        }
        envelope
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("http://localhost:8000")
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .user_agent("test-agent");

        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(ClientConfig::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_is_normalized() {
        let backend = Backend::new(ClientConfig::new(" http://localhost:8000/ ")).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.url("products"), "http://localhost:8000/api/products");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            Backend::new(ClientConfig::new("not a url")),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            Backend::new(ClientConfig::new("ftp://example.com")),
            Err(ClientError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/settings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true, "settings": {}})),
            )
            .mount(&server)
            .await;

        let backend = Backend::new(ClientConfig::new(server.uri())).unwrap();
        assert!(backend.health_check().await);
    }

    #[tokio::test]
    async fn test_session_cookie_is_replayed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/settings"))
            .and(wiremock::matchers::header("cookie", "session=abc"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true, "settings": {}})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/settings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "session=abc; Path=/")
                    .set_body_json(serde_json::json!({"success": false, "message": "Not authenticated"})),
            )
            .mount(&server)
            .await;

        let backend = Backend::new(ClientConfig::new(server.uri())).unwrap();
        assert!(!backend.health_check().await);
        assert!(backend.health_check().await);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let backend = Backend::new(
            ClientConfig::new("http://127.0.0.1:9").connect_timeout(Duration::from_millis(200)),
        )
        .unwrap();
        assert!(matches!(backend.get("settings").await, Err(ClientError::Transport(_))));
    }
}
