//! Revenue analytics types.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use terracotta_core::{Money, ProductId, SellerId, StatusParseError};

// ============================================================================
// Reporting period
// ============================================================================

/// Granularity of a revenue report.
///
/// Each period carries a conventional lookback window so that picking a
/// period alone yields a sensible chart without a manual date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One point per day over the last 90 days.
    Daily,
    /// One point per month over the last 12 months.
    #[default]
    Monthly,
    /// One point per quarter over the last 24 months.
    Quarterly,
    /// One point per year over the last 5 years.
    Yearly,
}

impl Period {
    /// Wire and query-string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// The conventional date window for this period, ending today.
    #[must_use]
    pub fn default_range(self, today: NaiveDate) -> DateRange {
        let start = match self {
            Self::Daily => today.checked_sub_days(Days::new(90)),
            Self::Monthly => today.checked_sub_months(Months::new(12)),
            Self::Quarterly => today.checked_sub_months(Months::new(24)),
            Self::Yearly => today.checked_sub_months(Months::new(60)),
        };
        DateRange {
            start_date: start.unwrap_or(today),
            end_date: today,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(StatusParseError::new("period", s)),
        }
    }
}

// ============================================================================
// Date ranges and queries
// ============================================================================

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range.
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Whether `date` falls inside the range, endpoints included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Query parameters shared by the revenue analytics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalyticsQuery {
    /// Report granularity.
    pub period: Period,
    /// First day of the reporting window.
    pub start_date: NaiveDate,
    /// Last day of the reporting window.
    pub end_date: NaiveDate,
}

impl AnalyticsQuery {
    /// Builds a query from a period and its window.
    #[must_use]
    pub const fn new(period: Period, range: DateRange) -> Self {
        Self {
            period,
            start_date: range.start_date,
            end_date: range.end_date,
        }
    }
}

// ============================================================================
// Report payloads
// ============================================================================

/// The headline revenue report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    /// Revenue over the window.
    #[serde(rename = "totalRevenue")]
    pub total_revenue: Money,
    /// Orders over the window.
    #[serde(rename = "totalOrders")]
    pub total_orders: i64,
    /// Mean order value over the window.
    #[serde(rename = "averageOrderValue")]
    pub average_order_value: Money,
    /// Chart points, one per period bucket.
    #[serde(default)]
    pub series: Vec<RevenuePoint>,
}

/// One chart point in a revenue series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Bucket label (server-formatted, e.g., "2026-07" or "Q2 2026").
    pub bucket: String,
    /// Revenue in the bucket.
    pub revenue: Money,
    /// Orders in the bucket.
    pub orders: i64,
}

/// One row of the best-selling products leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostSellingProduct {
    /// Product ID.
    #[serde(rename = "productID")]
    pub product_id: ProductId,
    /// Product name.
    #[serde(rename = "productName")]
    pub name: String,
    /// Units sold in the window.
    #[serde(rename = "unitsSold")]
    pub units_sold: i64,
    /// Revenue attributed to the product.
    pub revenue: Money,
}

/// One row of the top-sellers leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighestSalesSeller {
    /// Seller ID.
    #[serde(rename = "sellerID")]
    pub seller_id: SellerId,
    /// Registered business name.
    #[serde(rename = "businessName")]
    pub business_name: String,
    /// Revenue attributed to the seller.
    pub revenue: Money,
    /// Orders attributed to the seller.
    pub orders: i64,
}
