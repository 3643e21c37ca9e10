//! Seller account operations.

use tracing::instrument;

use terracotta_core::SellerId;

use super::types::{Seller, SellerDraft};
use super::{ApiError, MarketClient};
use crate::components::dialog::DetailSource;
use crate::components::list::ListSource;

impl MarketClient {
    /// Get every seller account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_sellers(&self) -> Result<Vec<Seller>, ApiError> {
        self.get("/sellers").await
    }

    /// Get a single seller by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the seller does not exist or the request fails.
    #[instrument(skip(self), fields(seller_id = %id))]
    pub async fn get_seller(&self, id: &SellerId) -> Result<Seller, ApiError> {
        self.get(&format!("/sellers/{id}")).await
    }

    /// Update a seller's editable fields, returning the updated account.
    ///
    /// # Errors
    ///
    /// Returns an error if the seller does not exist or the request fails.
    #[instrument(skip(self, draft), fields(seller_id = %id))]
    pub async fn update_seller(
        &self,
        id: &SellerId,
        draft: &SellerDraft,
    ) -> Result<Seller, ApiError> {
        self.put(&format!("/sellers/{id}"), draft).await
    }
}

/// List and detail source for seller screens.
#[derive(Debug, Clone)]
pub struct SellerSource {
    client: MarketClient,
}

impl SellerSource {
    #[must_use]
    pub const fn new(client: MarketClient) -> Self {
        Self { client }
    }
}

impl ListSource for SellerSource {
    type Entity = Seller;

    async fn fetch_all(&self) -> Result<Vec<Seller>, ApiError> {
        self.client.get_sellers().await
    }
}

impl DetailSource for SellerSource {
    type Id = SellerId;
    type Entity = Seller;
    type Draft = SellerDraft;

    async fn fetch_one(&self, id: &SellerId) -> Result<Seller, ApiError> {
        self.client.get_seller(id).await
    }

    async fn submit(&self, id: &SellerId, draft: &SellerDraft) -> Result<Seller, ApiError> {
        self.client.update_seller(id, draft).await
    }
}
