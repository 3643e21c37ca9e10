//! Product catalog operations.

use tracing::instrument;

use terracotta_core::{ApprovalStatus, ProductId};

use super::types::{ApprovalUpdate, Product};
use super::{ApiError, MarketClient};
use crate::components::dialog::DetailSource;
use crate::components::list::ListSource;

/// Which product listing to pull.
///
/// The public listing carries only approved products; moderation screens
/// need the admin listing, which includes pending and rejected ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogScope {
    /// `GET /products` - approved products only.
    Public,
    /// `GET /admin/products` - every product regardless of status.
    #[default]
    Admin,
}

impl CatalogScope {
    const fn path(self) -> &'static str {
        match self {
            Self::Public => "/products",
            Self::Admin => "/admin/products",
        }
    }
}

impl MarketClient {
    /// Get every product in the given catalog scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_products(&self, scope: CatalogScope) -> Result<Vec<Product>, ApiError> {
        self.get(scope.path()).await
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get(&format!("/products/{id}")).await
    }

    /// Set a product's approval status.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %id, status = %status))]
    pub async fn set_product_approval(
        &self,
        id: ProductId,
        status: ApprovalStatus,
    ) -> Result<(), ApiError> {
        let body = ApprovalUpdate {
            approval_status: status,
        };
        self.put_unit(&format!("/products/{id}"), &body).await
    }

    /// Delete a product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.delete(&format!("/products/{id}")).await
    }
}

/// List and detail source for product screens.
#[derive(Debug, Clone)]
pub struct ProductSource {
    client: MarketClient,
    scope: CatalogScope,
}

impl ProductSource {
    /// A source over the given catalog scope.
    #[must_use]
    pub const fn new(client: MarketClient, scope: CatalogScope) -> Self {
        Self { client, scope }
    }
}

impl ListSource for ProductSource {
    type Entity = Product;

    async fn fetch_all(&self) -> Result<Vec<Product>, ApiError> {
        self.client.get_products(self.scope).await
    }
}

impl DetailSource for ProductSource {
    type Id = ProductId;
    type Entity = Product;
    type Draft = ApprovalUpdate;

    async fn fetch_one(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.client.get_product(*id).await
    }

    // The status update endpoint returns no body, so the fresh record
    // comes from a follow-up read.
    async fn submit(&self, id: &ProductId, draft: &ApprovalUpdate) -> Result<Product, ApiError> {
        self.client
            .set_product_approval(*id, draft.approval_status)
            .await?;
        self.client.get_product(*id).await
    }
}
