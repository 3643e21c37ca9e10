//! Seller domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use terracotta_core::{Email, Money, SellerId};

use crate::components::filter::Filterable;

/// A seller account on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// Seller ID.
    #[serde(rename = "sellerID")]
    pub seller_id: SellerId,
    /// Registered business name.
    #[serde(rename = "businessName")]
    pub business_name: String,
    /// Owner's full name.
    #[serde(rename = "ownerName")]
    pub owner_name: String,
    /// Contact email, when on file.
    #[serde(default)]
    pub email: Option<Email>,
    /// Contact phone, when on file.
    #[serde(default)]
    pub phone: Option<String>,
    /// Account status (server-defined vocabulary, e.g., "active", "suspended").
    pub status: String,
    /// Lifetime revenue.
    pub revenue: Money,
    /// Lifetime order count.
    #[serde(rename = "totalOrders")]
    pub total_orders: i64,
    /// Average review rating.
    pub rating: f64,
    /// Account creation timestamp.
    #[serde(rename = "joinedAt", default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl Filterable for Seller {
    fn record_id(&self) -> String {
        self.seller_id.to_string()
    }

    fn status_label(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn filed_on(&self) -> Option<NaiveDate> {
        self.joined_at.map(|ts| ts.date_naive())
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.seller_id.to_string(),
            self.business_name.clone(),
            self.owner_name.clone(),
        ];
        if let Some(email) = &self.email {
            fields.push(email.to_string());
        }
        fields
    }
}

/// Editable seller fields for `PUT /sellers/{id}`.
///
/// Absent fields are omitted from the body so the server keeps
/// their current values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerDraft {
    /// New business name.
    #[serde(rename = "businessName", skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// New owner name.
    #[serde(rename = "ownerName", skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    /// New contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    /// New contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
