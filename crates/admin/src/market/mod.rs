//! Typed client for the marketplace REST API.
//!
//! One backend serves the whole admin surface: catalog, sellers, customers,
//! orders, after-sale requests, store verification, analytics, and commission
//! reports. Endpoint methods live in per-domain modules as `impl` extensions
//! of [`MarketClient`]; the wire types live under [`types`].
//!
//! Requests authenticate through an opaque session cookie. The client keeps
//! a cookie store and can seed a pre-issued cookie from configuration;
//! issuing sessions is the backend's business, not ours.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::MarketConfig;

pub mod types;

pub mod analytics;
pub mod customers;
pub mod orders;
pub mod products;
pub mod profile;
pub mod reports;
pub mod requests;
pub mod sellers;
pub mod stores;

pub use products::{CatalogScope, ProductSource};
pub use customers::CustomerSource;
pub use orders::OrderSource;
pub use requests::RequestSource;
pub use sellers::SellerSource;
pub use stores::StoreSource;
pub use types::*;

/// Attempts for the one retrying read path (revenue summary).
const RETRY_ATTEMPTS: u32 = 3;
/// Pause between retry attempts.
const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// Errors from the marketplace API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failure, including timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API.
    #[error("marketplace API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, or the status reason.
        message: String,
    },

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Authentication failed (401/403) - session missing or expired.
    #[error("authentication required (401/403)")]
    Unauthorized,

    /// Response body could not be deserialized.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Client-side configuration problem (bad cookie value, bad URL).
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether this failure is a transport timeout worth retrying.
    ///
    /// Connection resets count: the backend's reverse proxy drops slow
    /// requests the same way a timeout does.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout() || e.is_connect())
    }
}

/// Client for the marketplace REST API.
///
/// Cheap to clone; all clones share one connection pool and cookie store.
#[derive(Clone)]
pub struct MarketClient {
    inner: Arc<MarketClientInner>,
}

struct MarketClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl MarketClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cookie contains characters that
    /// cannot appear in a header, or if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &MarketConfig) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(cookie) = config.session_cookie_value() {
            let mut value = HeaderValue::from_str(cookie)
                .map_err(|e| ApiError::Config(format!("session cookie: {e}")))?;
            value.set_sensitive(true);
            headers.insert(header::COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            inner: Arc::new(MarketClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + Sync + ?Sized,
    {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// GET with the timeout retry loop: up to [`RETRY_ATTEMPTS`] tries with
    /// a fixed [`RETRY_PAUSE`] between them, retrying on timeouts only.
    pub(crate) async fn get_query_retry<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + Sync + ?Sized,
    {
        let mut attempt = 1;
        loop {
            match self.get_query(path, query).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_timeout() && attempt < RETRY_ATTEMPTS => {
                    tracing::warn!(path, attempt, "request timed out, retrying");
                    tokio::time::sleep(RETRY_PAUSE).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .inner
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub(crate) async fn put_unit<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    pub(crate) async fn post_unit<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let response = self.inner.client.post(self.url(path)).send().await?;
        Self::check_status(response).await
    }

    pub(crate) async fn post_query<Q>(&self, path: &str, query: &Q) -> Result<(), ApiError>
    where
        Q: Serialize + Sync + ?Sized,
    {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::check_status(response).await
    }

    pub(crate) async fn patch_empty(&self, path: &str) -> Result<(), ApiError> {
        let response = self.inner.client.patch(self.url(path)).send().await?;
        Self::check_status(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.inner.client.delete(self.url(path)).send().await?;
        Self::check_status(response).await
    }

    // =========================================================================
    // Response handling
    // =========================================================================

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()))
        } else {
            Err(Self::parse_error(status, response).await)
        }
    }

    async fn check_status(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, response).await)
        }
    }

    async fn parse_error(status: StatusCode, response: Response) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound(response.url().path().to_owned()),
            _ => {
                let message = match response.text().await {
                    Ok(body) => extract_error_message(&body).unwrap_or_else(|| {
                        status
                            .canonical_reason()
                            .unwrap_or("unknown error")
                            .to_owned()
                    }),
                    Err(e) => e.to_string(),
                };
                ApiError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

impl fmt::Debug for MarketClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend is inconsistent: some handlers return `{"message": ...}`,
/// others `{"error": ...}`, a few plain text.
fn extract_error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(serde_json::Value::as_str) {
                return Some(msg.to_owned());
            }
        }
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
