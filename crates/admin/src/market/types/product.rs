//! Product domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use terracotta_core::{ApprovalStatus, Money, ProductId, SellerId};

use crate::components::filter::Filterable;

/// A product listing in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID (numeric, unlike the other entities).
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "productName")]
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Units in stock.
    pub quantity: i64,
    /// Category label (e.g., "Ceramics", "Textiles").
    pub category: String,
    /// Review state.
    pub approval_status: ApprovalStatus,
    /// Owning seller, when the listing includes it.
    #[serde(rename = "sellerID", default)]
    pub seller_id: Option<SellerId>,
    /// Listing creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Filterable for Product {
    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.approval_status.as_str())
    }

    fn category_label(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn filed_on(&self) -> Option<NaiveDate> {
        self.created_at.map(|ts| ts.date_naive())
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.category.clone(),
        ]
    }
}

/// Body for `PUT /products/{id}`: the one mutable product field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalUpdate {
    /// New review state.
    pub approval_status: ApprovalStatus,
}
