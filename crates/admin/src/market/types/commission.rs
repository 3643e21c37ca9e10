//! Commission report types.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use terracotta_core::{Money, ProductId};

/// Query parameters shared by the commission report endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    /// First day of the reporting window.
    pub from_date: NaiveDate,
    /// Last day of the reporting window.
    pub to_date: NaiveDate,
}

impl ReportWindow {
    /// The trailing 30 days ending today.
    #[must_use]
    pub fn trailing_month(today: NaiveDate) -> Self {
        Self {
            from_date: today.checked_sub_days(Days::new(30)).unwrap_or(today),
            to_date: today,
        }
    }
}

/// The marketplace-wide commission report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemCommission {
    /// Gross sales over the window.
    #[serde(rename = "totalSales")]
    pub total_sales: Money,
    /// Commission collected over the window.
    #[serde(rename = "totalCommission")]
    pub total_commission: Money,
    /// Commission as a fraction of sales, when the server computes it.
    #[serde(rename = "effectiveRate", default)]
    pub effective_rate: Option<f64>,
    /// Per-bucket breakdown.
    #[serde(default)]
    pub rows: Vec<CommissionBucket>,
}

/// One time bucket of the system commission breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionBucket {
    /// Bucket label (server-formatted).
    pub bucket: String,
    /// Gross sales in the bucket.
    pub sales: Money,
    /// Commission collected in the bucket.
    pub commission: Money,
}

/// One row of the per-item commission report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCommission {
    /// Product ID.
    #[serde(rename = "productID")]
    pub product_id: ProductId,
    /// Product name.
    #[serde(rename = "productName")]
    pub name: String,
    /// Gross sales of the item.
    pub sales: Money,
    /// Commission collected on the item.
    pub commission: Money,
}

/// One row of the per-category commission report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCommission {
    /// Category label.
    pub category: String,
    /// Gross sales in the category.
    pub sales: Money,
    /// Commission collected in the category.
    pub commission: Money,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_month_window() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let window = ReportWindow::trailing_month(today);
        assert_eq!(window.from_date, NaiveDate::from_ymd_opt(2026, 7, 24).unwrap());
        assert_eq!(window.to_date, today);
    }

    #[test]
    fn test_window_query_string() {
        let window = ReportWindow {
            from_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
        };
        let encoded = serde_urlencoded::to_string(window).unwrap();
        assert_eq!(encoded, "from_date=2026-07-01&to_date=2026-07-31");
    }

    #[test]
    fn test_system_report_optional_fields() {
        let report: SystemCommission = serde_json::from_str(
            r#"{
                "totalSales": "52000.00",
                "totalCommission": "5200.00"
            }"#,
        )
        .unwrap();
        assert!(report.effective_rate.is_none());
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_item_row_wire_names() {
        let row: ItemCommission = serde_json::from_str(
            r#"{
                "productID": 9,
                "productName": "Woven Basket",
                "sales": "900.00",
                "commission": "90.00"
            }"#,
        )
        .unwrap();
        assert_eq!(row.product_id, ProductId::new(9));
        assert_eq!(row.name, "Woven Basket");
    }
}
