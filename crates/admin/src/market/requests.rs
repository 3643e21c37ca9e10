//! After-sale request operations.

use tracing::instrument;

use terracotta_core::{RequestId, RequestStatus};

use super::types::{RequestStatusUpdate, ReturnRequest};
use super::{ApiError, MarketClient};
use crate::components::list::ListSource;

impl MarketClient {
    /// Get every after-sale request.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn get_requests(&self) -> Result<Vec<ReturnRequest>, ApiError> {
        self.get("/after-sale/admin/requests").await
    }

    /// Move a request to a new status, optionally recording admin notes.
    ///
    /// Returns the updated request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist, the transition is
    /// not allowed, or the request fails.
    #[instrument(skip(self, notes), fields(request_id = %id, status = %status))]
    pub async fn update_request_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        notes: Option<String>,
    ) -> Result<ReturnRequest, ApiError> {
        let body = RequestStatusUpdate {
            status,
            admin_notes: notes,
        };
        self.put(&format!("/after-sale/admin/requests/{id}/status"), &body)
            .await
    }
}

/// List source for the after-sale requests screen.
#[derive(Debug, Clone)]
pub struct RequestSource {
    client: MarketClient,
}

impl RequestSource {
    #[must_use]
    pub const fn new(client: MarketClient) -> Self {
        Self { client }
    }
}

impl ListSource for RequestSource {
    type Entity = ReturnRequest;

    async fn fetch_all(&self) -> Result<Vec<ReturnRequest>, ApiError> {
        self.client.get_requests().await
    }
}
