//! After-sale request domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use terracotta_core::{OrderId, RequestId, RequestStatus, RequestType};

use crate::components::filter::Filterable;

/// An after-sale request (return, refund, exchange, and so on).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRequest {
    /// Request ID.
    pub request_id: RequestId,
    /// Order the request concerns, when linked.
    #[serde(default)]
    pub order_id: Option<OrderId>,
    /// Requesting customer's name, when included.
    #[serde(default)]
    pub customer: Option<String>,
    /// What kind of request this is.
    #[serde(rename = "type")]
    pub kind: RequestType,
    /// Current processing status.
    pub status: RequestStatus,
    /// Customer-provided reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Notes left by the reviewing admin.
    #[serde(default)]
    pub admin_notes: Option<String>,
    /// Customer-uploaded evidence.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Request filing timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Filterable for ReturnRequest {
    fn record_id(&self) -> String {
        self.request_id.to_string()
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    // The request type takes the category slot so the shared
    // filter bar can narrow by it.
    fn category_label(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }

    fn filed_on(&self) -> Option<NaiveDate> {
        self.created_at.map(|ts| ts.date_naive())
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.request_id.to_string()];
        if let Some(order_id) = &self.order_id {
            fields.push(order_id.to_string());
        }
        if let Some(customer) = &self.customer {
            fields.push(customer.clone());
        }
        fields
    }
}

/// A file the customer attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name.
    pub file_name: String,
    /// Download URL.
    pub url: String,
}

/// Body for `PUT /after-sale/admin/requests/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStatusUpdate {
    /// New processing status.
    pub status: RequestStatus,
    /// Notes to record alongside the decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}
