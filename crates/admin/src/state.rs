//! Shared application state.
//!
//! One [`AppState`] backs the whole admin session: the API client, the
//! signed-in profile, and the toast queue every screen pushes into.
//! Cloning is cheap; clones share everything.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AdminConfig;
use crate::error::AppError;
use crate::market::types::AdminProfile;
use crate::market::{ApiError, MarketClient};
use crate::toast::ToastQueue;

/// Shared state for an admin session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    market: MarketClient,
    toasts: ToastQueue,
    session: RwLock<Option<AdminProfile>>,
}

impl AppState {
    /// Build state from an already-loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be constructed from the
    /// configuration.
    pub fn new(config: AdminConfig) -> Result<Self, AppError> {
        let market = MarketClient::new(&config.market)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                market,
                toasts: ToastQueue::new(),
                session: RwLock::new(None),
            }),
        })
    }

    /// Build state from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid,
    /// or if the API client cannot be constructed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(AdminConfig::from_env()?)
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The shared API client.
    #[must_use]
    pub fn market(&self) -> &MarketClient {
        &self.inner.market
    }

    /// The shared notification queue.
    #[must_use]
    pub fn toasts(&self) -> &ToastQueue {
        &self.inner.toasts
    }

    /// Resolve the session cookie into a signed-in profile.
    ///
    /// # Errors
    ///
    /// [`AppError::NotSignedIn`] if the backend rejects the session, or
    /// the API error if the request fails outright.
    pub async fn sign_in(&self) -> Result<AdminProfile, AppError> {
        let profile = match self.inner.market.get_profile().await {
            Ok(profile) => profile,
            Err(ApiError::Unauthorized) => return Err(AppError::NotSignedIn),
            Err(err) => return Err(err.into()),
        };
        *self.inner.session.write().await = Some(profile.clone());
        Ok(profile)
    }

    /// The signed-in profile, if any.
    pub async fn current_user(&self) -> Option<AdminProfile> {
        self.inner.session.read().await.clone()
    }

    /// The signed-in profile, or [`AppError::NotSignedIn`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotSignedIn`] when no one has signed in.
    pub async fn require_user(&self) -> Result<AdminProfile, AppError> {
        self.current_user().await.ok_or(AppError::NotSignedIn)
    }

    /// Drop the local session and any queued notifications.
    pub async fn sign_out(&self) {
        *self.inner.session.write().await = None;
        self.inner.toasts.clear();
    }

    /// Deactivate the signed-in account, then sign out locally.
    ///
    /// # Errors
    ///
    /// Returns the API error if the deactivation request fails; the local
    /// session is kept in that case.
    pub async fn deactivate_account(&self) -> Result<(), AppError> {
        self.inner.market.deactivate_account().await?;
        self.sign_out().await;
        Ok(())
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;
    use crate::config::MarketConfig;

    fn state() -> AppState {
        let config = AdminConfig {
            market: MarketConfig {
                base_url: Url::parse("http://localhost:4000").unwrap(),
                session_cookie: None,
                timeout: Duration::from_secs(5),
            },
            refresh_interval: Duration::from_secs(60),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        AppState::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_session_starts_empty() {
        let state = state();
        assert!(state.current_user().await.is_none());
        assert!(matches!(
            state.require_user().await,
            Err(AppError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn test_sign_out_clears_toasts() {
        let state = state();
        state.toasts().success("loaded");
        assert_eq!(state.toasts().len(), 1);

        state.sign_out().await;
        assert!(state.toasts().is_empty());
        assert!(state.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let state = state();
        let clone = state.clone();
        clone.toasts().error("broke");
        assert_eq!(state.toasts().len(), 1);
    }
}
