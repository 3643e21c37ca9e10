//! Order management operations.
//!
//! Orders live under `/orders-test`; the path is the backend's, kept
//! verbatim until it stabilizes.

use tracing::instrument;

use terracotta_core::OrderId;

use super::types::Order;
use super::{ApiError, MarketClient};
use crate::components::list::ListSource;

impl MarketClient {
    /// Get every order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders-test").await
    }

    /// Cancel an order on the customer's behalf.
    ///
    /// The server decides cancellability; an order past fulfilment comes
    /// back as an API error with the reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist, can no longer be
    /// cancelled, or the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel_order(&self, id: &OrderId) -> Result<(), ApiError> {
        self.post_empty(&format!("/orders-test/{id}/cancel")).await
    }
}

/// List source for the orders screen.
#[derive(Debug, Clone)]
pub struct OrderSource {
    client: MarketClient,
}

impl OrderSource {
    #[must_use]
    pub const fn new(client: MarketClient) -> Self {
        Self { client }
    }
}

impl ListSource for OrderSource {
    type Entity = Order;

    async fn fetch_all(&self) -> Result<Vec<Order>, ApiError> {
        self.client.get_orders().await
    }
}
