//! Customer account operations.

use tracing::instrument;

use terracotta_core::CustomerId;

use super::types::{Customer, CustomerDraft};
use super::{ApiError, MarketClient};
use crate::components::dialog::DetailSource;
use crate::components::list::ListSource;

impl MarketClient {
    /// Get every customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get("/customers").await
    }

    /// Get a single customer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist or the request fails.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ApiError> {
        self.get(&format!("/customers/{id}")).await
    }

    /// Update a customer's editable fields, returning the updated account.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist or the request fails.
    #[instrument(skip(self, draft), fields(customer_id = %id))]
    pub async fn update_customer(
        &self,
        id: &CustomerId,
        draft: &CustomerDraft,
    ) -> Result<Customer, ApiError> {
        self.put(&format!("/customers/{id}"), draft).await
    }
}

/// List and detail source for customer screens.
#[derive(Debug, Clone)]
pub struct CustomerSource {
    client: MarketClient,
}

impl CustomerSource {
    #[must_use]
    pub const fn new(client: MarketClient) -> Self {
        Self { client }
    }
}

impl ListSource for CustomerSource {
    type Entity = Customer;

    async fn fetch_all(&self) -> Result<Vec<Customer>, ApiError> {
        self.client.get_customers().await
    }
}

impl DetailSource for CustomerSource {
    type Id = CustomerId;
    type Entity = Customer;
    type Draft = CustomerDraft;

    async fn fetch_one(&self, id: &CustomerId) -> Result<Customer, ApiError> {
        self.client.get_customer(id).await
    }

    async fn submit(&self, id: &CustomerId, draft: &CustomerDraft) -> Result<Customer, ApiError> {
        self.client.update_customer(id, draft).await
    }
}
