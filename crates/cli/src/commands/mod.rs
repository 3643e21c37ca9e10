//! Command implementations for `tc-cli`.
//!
//! Each module drives the corresponding admin screen's controllers end to
//! end: listings go through [`ListController`], edits through the edit
//! dialog, and destructive actions through the confirmation dialog.

pub mod analytics;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod profile;
pub mod reports;
pub mod requests;
pub mod sellers;
pub mod stores;

use std::io::Write;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use terracotta_admin::components::{AutoRefresh, DialogError, ListController, ListSource};
use terracotta_admin::error::AppError;
use terracotta_admin::market::ApiError;
use terracotta_admin::state::AppState;
use terracotta_admin::toast::ToastLevel;
use terracotta_core::StatusParseError;

/// Errors a command can surface.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Dialog(#[from] DialogError),

    #[error(transparent)]
    Status(#[from] StatusParseError),
}

impl CommandError {
    /// Whether the failure is transient and re-running the command may
    /// succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::App(app) => app.is_retryable(),
            Self::Api(api) | Self::Dialog(DialogError::Api(api)) => api.is_timeout(),
            Self::Dialog(DialogError::NotOpen) | Self::Status(_) => false,
        }
    }
}

/// Forward queued toasts to the log, oldest first.
pub fn drain_toasts(state: &AppState) {
    for toast in state.toasts().drain() {
        match toast.level {
            ToastLevel::Error => tracing::error!("{}", toast.message),
            ToastLevel::Success | ToastLevel::Info => tracing::info!("{}", toast.message),
        }
    }
}

/// Ask for confirmation on the terminal; `assume_yes` skips the prompt.
pub(crate) fn confirmed(summary: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    #[allow(clippy::print_stdout)]
    {
        print!("{summary} [y/N] ");
        let _ = std::io::stdout().flush();
    }
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}

/// Pull a list on the configured interval until Ctrl-C, rendering after
/// each pull.
pub(crate) async fn watch_list<S>(
    state: &AppState,
    mut controller: ListController<S>,
    render: fn(&ListController<S>),
) where
    S: ListSource + Send + Sync + 'static,
    S::Entity: Send + Sync + 'static,
{
    controller.fetch().await;
    render(&controller);

    let shared = Arc::new(Mutex::new(controller));
    let worker = Arc::clone(&shared);
    let refresh = AutoRefresh::spawn(state.config().refresh_interval, move || {
        let worker = Arc::clone(&worker);
        async move {
            let mut guard = worker.lock().await;
            guard.fetch().await;
            render(&guard);
        }
    });

    tracing::info!("watching; Ctrl-C to stop");
    let _ = tokio::signal::ctrl_c().await;
    refresh.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability_follows_the_error_tier() {
        let rejected = CommandError::Api(ApiError::Api {
            status: 409,
            message: "order already shipped".to_owned(),
        });
        assert!(!rejected.is_retryable());
        assert!(!CommandError::App(AppError::NotSignedIn).is_retryable());
        assert!(!CommandError::Dialog(DialogError::NotOpen).is_retryable());
    }
}
