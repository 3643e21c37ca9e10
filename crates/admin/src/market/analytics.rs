//! Revenue analytics operations.
//!
//! The summary endpoint still lives at its scaffolding path
//! `/analytics/test-controller`. It is also the slowest query in the
//! backend, so it alone gets the timeout retry loop.

use tracing::instrument;

use super::types::{AnalyticsQuery, HighestSalesSeller, MostSellingProduct, RevenueSummary};
use super::{ApiError, MarketClient};

impl MarketClient {
    /// Get the headline revenue report for a window.
    ///
    /// Retries timeouts up to three times with a short pause between
    /// attempts before giving up.
    ///
    /// # Errors
    ///
    /// Returns an error if every attempt times out or the API returns an
    /// error response.
    #[instrument(skip(self), fields(period = %query.period))]
    pub async fn get_revenue_summary(
        &self,
        query: AnalyticsQuery,
    ) -> Result<RevenueSummary, ApiError> {
        self.get_query_retry("/analytics/test-controller", &query)
            .await
    }

    /// Get the best-selling products leaderboard for a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(period = %query.period))]
    pub async fn get_most_selling_products(
        &self,
        query: AnalyticsQuery,
    ) -> Result<Vec<MostSellingProduct>, ApiError> {
        self.get_query("/analytics/revenue/most-selling-products", &query)
            .await
    }

    /// Get the top-sellers leaderboard for a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(period = %query.period))]
    pub async fn get_highest_sales_sellers(
        &self,
        query: AnalyticsQuery,
    ) -> Result<Vec<HighestSalesSeller>, ApiError> {
        self.get_query("/analytics/revenue/highest-sales-sellers", &query)
            .await
    }

    /// Ask the backend to regenerate the public analytics snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(period = %query.period))]
    pub async fn generate_public_report(&self, query: AnalyticsQuery) -> Result<(), ApiError> {
        self.post_query("/analytics/generate-public", &query).await
    }
}
