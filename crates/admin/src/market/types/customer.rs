//! Customer domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use terracotta_core::{CustomerId, Email, Money};

use crate::components::filter::Filterable;

/// A customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer ID.
    #[serde(rename = "userID")]
    pub user_id: CustomerId,
    /// Full name.
    pub name: String,
    /// Account email.
    pub email: Email,
    /// Shipping address, when on file.
    #[serde(default)]
    pub address: Option<String>,
    /// Lifetime spend.
    #[serde(rename = "totalSpend")]
    pub total_spend: Money,
    /// Lifetime order count.
    #[serde(rename = "totalOrders")]
    pub total_orders: i64,
    /// Account creation timestamp.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Filterable for Customer {
    fn record_id(&self) -> String {
        self.user_id.to_string()
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.name.clone(),
            self.email.to_string(),
        ]
    }
}

/// Editable customer fields for `PUT /customers/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    /// New full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New account email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    /// New shipping address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn customer() -> Customer {
        Customer {
            user_id: CustomerId::new("C100"),
            name: "Jules Ferrand".to_owned(),
            email: "jules@example.com".parse().unwrap(),
            address: Some("12 Rue des Potiers".to_owned()),
            total_spend: Money::new(Decimal::new(98_050, 2)),
            total_orders: 14,
            created_at: None,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(customer()).unwrap();
        assert_eq!(json["userID"], "C100");
        assert_eq!(json["totalSpend"], "980.50");
        assert_eq!(json["totalOrders"], 14);
    }

    #[test]
    fn test_no_status_or_category_facets() {
        let customer = customer();
        assert!(customer.status_label().is_none());
        assert!(customer.category_label().is_none());
        assert!(customer.filed_on().is_none());
    }

    #[test]
    fn test_draft_with_single_field() {
        let draft = CustomerDraft {
            address: Some("4 Market Lane".to_owned()),
            ..CustomerDraft::default()
        };
        assert_eq!(
            serde_json::to_string(&draft).unwrap(),
            r#"{"address":"4 Market Lane"}"#
        );
    }
}
