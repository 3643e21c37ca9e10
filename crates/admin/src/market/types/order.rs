//! Order domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use terracotta_core::{Money, OrderId};

use crate::components::filter::Filterable;

/// An order as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Name of the ordering customer.
    #[serde(rename = "customerName")]
    pub customer_name: String,
    /// Order total.
    pub amount: Money,
    /// Fulfilment status (server-defined vocabulary, e.g., "pending", "shipped").
    pub status: String,
    /// Payment method label.
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
    /// Payment status label.
    #[serde(rename = "paymentStatus")]
    pub payment_status: String,
    /// Whether the server will still accept a cancellation.
    #[serde(rename = "canCancel", default)]
    pub can_cancel: bool,
    /// Order placement timestamp.
    #[serde(rename = "placedAt", default)]
    pub placed_at: Option<DateTime<Utc>>,
}

impl Filterable for Order {
    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn status_label(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn filed_on(&self) -> Option<NaiveDate> {
        self.placed_at.map(|ts| ts.date_naive())
    }

    fn search_fields(&self) -> Vec<String> {
        vec![self.id.to_string(), self.customer_name.clone()]
    }
}
