//! Store verification operations.

use tracing::instrument;

use terracotta_core::StoreId;

use super::types::{SellerDetails, Store, StoreDocument, StoreRejection, VerificationStats};
use super::{ApiError, MarketClient};
use crate::components::list::ListSource;

impl MarketClient {
    /// Get every store in the verification queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_stores(&self) -> Result<Vec<Store>, ApiError> {
        self.get("/admin/stores").await
    }

    /// Approve a store's verification application.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist, is not pending, or
    /// the request fails.
    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn approve_store(&self, id: &StoreId) -> Result<(), ApiError> {
        self.post_empty(&format!("/admin/stores/{id}/approve")).await
    }

    /// Reject a store's verification application with a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist, is not pending, or
    /// the request fails.
    #[instrument(skip(self, reason), fields(store_id = %id))]
    pub async fn reject_store(&self, id: &StoreId, reason: String) -> Result<(), ApiError> {
        let body = StoreRejection { reason };
        self.post_unit(&format!("/admin/stores/{id}/reject"), &body)
            .await
    }

    /// Get the documents a store submitted for verification.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist or the request fails.
    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn get_store_documents(&self, id: &StoreId) -> Result<Vec<StoreDocument>, ApiError> {
        self.get(&format!("/admin/stores/{id}/documents")).await
    }

    /// Get the seller background attached to a store's application.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not exist or the request fails.
    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn get_seller_details(&self, id: &StoreId) -> Result<SellerDetails, ApiError> {
        self.get(&format!("/admin/stores/{id}/seller-details")).await
    }

    /// Get the pending-work counters for the verification dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_verification_stats(&self) -> Result<VerificationStats, ApiError> {
        self.get("/admin/verification-stats").await
    }
}

/// List source for the store verification screen.
#[derive(Debug, Clone)]
pub struct StoreSource {
    client: MarketClient,
}

impl StoreSource {
    #[must_use]
    pub const fn new(client: MarketClient) -> Self {
        Self { client }
    }
}

impl ListSource for StoreSource {
    type Entity = Store;

    async fn fetch_all(&self) -> Result<Vec<Store>, ApiError> {
        self.client.get_stores().await
    }
}
