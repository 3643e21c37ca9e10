//! Commission report operations.

use tracing::instrument;

use super::types::{CategoryCommission, ItemCommission, ReportWindow, SystemCommission};
use super::{ApiError, MarketClient};

impl MarketClient {
    /// Get the marketplace-wide commission report for a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_system_commission(
        &self,
        window: ReportWindow,
    ) -> Result<SystemCommission, ApiError> {
        self.get_query("/admin/reports/system-commission", &window)
            .await
    }

    /// Get the per-item commission report for a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_item_commission(
        &self,
        window: ReportWindow,
    ) -> Result<Vec<ItemCommission>, ApiError> {
        self.get_query("/admin/reports/item-commission", &window)
            .await
    }

    /// Get the per-category commission report for a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_category_commission(
        &self,
        window: ReportWindow,
    ) -> Result<Vec<CategoryCommission>, ApiError> {
        self.get_query("/admin/reports/category-commission", &window)
            .await
    }
}
