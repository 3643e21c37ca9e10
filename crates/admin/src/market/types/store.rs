//! Store verification domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use terracotta_core::{Email, StoreId, StoreStatus};

use crate::components::filter::Filterable;

/// A storefront awaiting or past verification review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Store ID.
    #[serde(rename = "storeID")]
    pub store_id: StoreId,
    /// Storefront display name.
    pub name: String,
    /// Owner's full name.
    pub owner: String,
    /// Tax identification number.
    #[serde(rename = "TIN", default)]
    pub tin: Option<String>,
    /// Verification state.
    pub status: StoreStatus,
    /// When the verification application was submitted.
    #[serde(rename = "submittedAt", default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Filterable for Store {
    fn record_id(&self) -> String {
        self.store_id.to_string()
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn filed_on(&self) -> Option<NaiveDate> {
        self.submitted_at.map(|ts| ts.date_naive())
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.store_id.to_string(),
            self.name.clone(),
            self.owner.clone(),
        ]
    }
}

/// A verification document uploaded by the store owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Document name (e.g., "Business licence").
    pub name: String,
    /// Download URL.
    pub url: String,
    /// Upload timestamp.
    #[serde(rename = "uploadedAt", default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Seller background shown alongside a verification application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerDetails {
    /// Owner's full name.
    #[serde(rename = "ownerName")]
    pub owner_name: String,
    /// Contact email, when on file.
    #[serde(default)]
    pub email: Option<Email>,
    /// Contact phone, when on file.
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-text seller biography.
    #[serde(default)]
    pub bio: Option<String>,
}

/// Body for `POST /admin/stores/{id}/reject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRejection {
    /// Reason shown to the store owner.
    pub reason: String,
}

/// Pending-work counters for the verification dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStats {
    /// Stores awaiting review.
    #[serde(rename = "pendingStores")]
    pub pending_stores: i64,
    /// Products awaiting review.
    #[serde(rename = "pendingProducts")]
    pub pending_products: i64,
    /// After-sale requests awaiting review.
    #[serde(rename = "pendingRequests")]
    pub pending_requests: i64,
}

impl VerificationStats {
    /// Total items across every review queue.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.pending_stores + self.pending_products + self.pending_requests
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store {
            store_id: StoreId::new("ST010"),
            name: "Clay & Ember".to_owned(),
            owner: "Mara Voss".to_owned(),
            tin: Some("TN-99821".to_owned()),
            status: StoreStatus::Pending,
            submitted_at: None,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(store()).unwrap();
        assert_eq!(json["storeID"], "ST010");
        assert_eq!(json["TIN"], "TN-99821");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_search_fields() {
        let fields = store().search_fields();
        assert_eq!(fields, vec!["ST010", "Clay & Ember", "Mara Voss"]);
    }

    #[test]
    fn test_stats_total() {
        let stats = VerificationStats {
            pending_stores: 3,
            pending_products: 12,
            pending_requests: 5,
        };
        assert_eq!(stats.total(), 20);
    }

    #[test]
    fn test_rejection_body() {
        let body = StoreRejection {
            reason: "TIN does not match registry".to_owned(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"reason":"TIN does not match registry"}"#
        );
    }
}
