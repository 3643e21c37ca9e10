//! Application-level error type.
//!
//! Most of the library deals in [`ApiError`](crate::market::ApiError)
//! directly; this aggregate exists for the surfaces that cross both the API
//! and configuration (app state construction, the CLI shell).

use thiserror::Error;

use crate::config::ConfigError;
use crate::market::ApiError;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Marketplace API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No admin is signed in for an operation that requires a session.
    #[error("not signed in")]
    NotSignedIn,
}

impl AppError {
    /// Whether this is a read-tier failure worth retrying inline.
    ///
    /// Everything else belongs in the blocking tier.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_timeout())
    }
}
