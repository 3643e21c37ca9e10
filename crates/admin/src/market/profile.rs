//! Session profile operations.

use tracing::instrument;

use super::types::AdminProfile;
use super::{ApiError, MarketClient};

impl MarketClient {
    /// Get the profile behind the current session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] if the session is missing or
    /// expired, or another error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<AdminProfile, ApiError> {
        self.get("/auth/profile").await
    }

    /// Deactivate the signed-in account.
    ///
    /// The session is dead afterwards; callers should drop their local
    /// session state too.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn deactivate_account(&self) -> Result<(), ApiError> {
        self.patch_empty("/user/deactivate").await
    }
}
