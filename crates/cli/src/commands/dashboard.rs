//! Verification dashboard command.
//!
//! # Usage
//!
//! ```bash
//! tc-cli dashboard
//!
//! # Keep polling until Ctrl-C
//! tc-cli dashboard --watch
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;

use terracotta_admin::components::{AutoRefresh, StatsPanel};
use terracotta_admin::state::AppState;

use super::CommandError;

/// Show the pending-work counters, optionally polling until Ctrl-C.
pub async fn show(state: &AppState, watch: bool) -> Result<(), CommandError> {
    let mut panel = StatsPanel::new(state.market().clone());
    panel.refresh().await;
    render(&panel);
    if let Some(error) = panel.error() {
        state
            .toasts()
            .error(format!("dashboard refresh failed: {error}"));
    }
    if !watch {
        return Ok(());
    }

    let shared = Arc::new(Mutex::new(panel));
    let worker = Arc::clone(&shared);
    let refresh = AutoRefresh::spawn(state.config().refresh_interval, move || {
        let worker = Arc::clone(&worker);
        async move {
            let mut guard = worker.lock().await;
            guard.refresh().await;
            render(&guard);
        }
    });

    tracing::info!("watching; Ctrl-C to stop");
    let _ = tokio::signal::ctrl_c().await;
    refresh.cancel();
    Ok(())
}

fn render(panel: &StatsPanel) {
    #[allow(clippy::print_stdout)]
    {
        let Some(stats) = panel.stats() else {
            println!("no counters loaded");
            return;
        };
        println!("Pending stores:   {}", stats.pending_stores);
        println!("Pending products: {}", stats.pending_products);
        println!("Pending requests: {}", stats.pending_requests);
        println!("Total:            {}", stats.total());
    }
}
