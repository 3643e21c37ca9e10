//! Verification dashboard counters.

use crate::market::MarketClient;
use crate::market::types::VerificationStats;

/// State machine for the pending-work counter strip.
///
/// Same refresh discipline as the lists: replace on success, keep the
/// stale counters and surface the error on failure.
#[derive(Debug)]
pub struct StatsPanel {
    market: MarketClient,
    stats: Option<VerificationStats>,
    loading: bool,
    error: Option<String>,
}

impl StatsPanel {
    /// A panel with nothing loaded yet.
    #[must_use]
    pub const fn new(market: MarketClient) -> Self {
        Self {
            market,
            stats: None,
            loading: false,
            error: None,
        }
    }

    /// Reload the counters.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.market.get_verification_stats().await {
            Ok(stats) => {
                self.stats = Some(stats);
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    /// The counters, once loaded.
    #[must_use]
    pub const fn stats(&self) -> Option<&VerificationStats> {
        self.stats.as_ref()
    }

    /// Whether a reload is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last refresh error, cleared by the next successful refresh.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
