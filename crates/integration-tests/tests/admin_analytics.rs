//! End-to-end tests for the revenue analytics and commission screens.
//!
//! The revenue summary is the one retrying read in the whole client, so the
//! timeout recovery path is exercised here against a deliberately stalled
//! mock endpoint.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};
use serde_json::json;

use terracotta_admin::components::{AnalyticsPanel, CommissionPanel};
use terracotta_admin::market::types::{AnalyticsQuery, DateRange, Period};
use terracotta_integration_tests::MockMarket;

fn seed_reports(market: &MockMarket) {
    market.set_summary(json!({
        "totalRevenue": "10400.00",
        "totalOrders": 87,
        "averageOrderValue": "119.54",
        "series": [
            { "bucket": "2026-07", "revenue": "5200.00", "orders": 44 },
            { "bucket": "2026-08", "revenue": "5200.00", "orders": 43 }
        ]
    }));
    market.set_top_products(json!([
        { "productID": 77, "productName": "Glazed Mug", "unitsSold": 240, "revenue": "10800.00" }
    ]));
    market.set_top_sellers(json!([
        { "sellerID": "S042", "businessName": "Kiln & Loom", "revenue": "12500.00", "orders": 310 }
    ]));
}

// ============================================================================
// Revenue analytics
// ============================================================================

#[tokio::test]
async fn test_refresh_loads_summary_and_both_leaderboards() {
    let market = MockMarket::start().await;
    seed_reports(&market);

    let mut panel = AnalyticsPanel::new(market.client());
    panel.refresh().await;

    assert!(panel.error().is_none());
    assert_eq!(panel.summary().unwrap().total_orders, 87);
    assert_eq!(panel.summary().unwrap().series.len(), 2);
    assert_eq!(panel.top_products().len(), 1);
    assert_eq!(panel.top_sellers()[0].business_name, "Kiln & Loom");

    assert_eq!(market.calls_to("GET /analytics/test-controller"), 1);
    assert_eq!(
        market.calls_to("GET /analytics/revenue/most-selling-products"),
        1
    );
    assert_eq!(
        market.calls_to("GET /analytics/revenue/highest-sales-sellers"),
        1
    );
}

#[tokio::test]
async fn test_switching_to_daily_rewrites_the_window() {
    let market = MockMarket::start().await;
    seed_reports(&market);

    let mut panel = AnalyticsPanel::new(market.client());
    let today = Utc::now().date_naive();
    panel.set_period(Period::Daily).await;

    assert_eq!(panel.period(), Period::Daily);
    assert_eq!(
        panel.range().start_date,
        today.checked_sub_days(Days::new(90)).unwrap()
    );
    assert_eq!(panel.range().end_date, today);

    // The rewritten window went out with the next fetch.
    let expected = format!(
        "GET /analytics/test-controller?period=daily&start_date={}&end_date={}",
        panel.range().start_date,
        panel.range().end_date
    );
    assert!(market.request_log().contains(&expected));
}

#[tokio::test]
async fn test_generate_public_posts_the_current_window() {
    let market = MockMarket::start().await;
    seed_reports(&market);

    let panel = AnalyticsPanel::new(market.client()).with_range(DateRange {
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
    });
    panel.generate_public().await.expect("regeneration accepted");

    assert!(market.request_log().contains(
        &"POST /analytics/generate-public?period=monthly&start_date=2026-01-01&end_date=2026-06-30"
            .to_owned()
    ));
}

// ============================================================================
// Timeout retry
// ============================================================================

#[tokio::test]
async fn test_summary_retry_recovers_after_two_timeouts() {
    let market = MockMarket::start().await;
    seed_reports(&market);
    market.stall_summaries(2);

    let client = market.client_with_timeout(Duration::from_millis(300));
    let query = AnalyticsQuery::new(
        Period::Monthly,
        Period::Monthly.default_range(Utc::now().date_naive()),
    );
    let summary = client
        .get_revenue_summary(query)
        .await
        .expect("third attempt should succeed");

    assert_eq!(summary.total_orders, 87);
    assert_eq!(market.calls_to("GET /analytics/test-controller"), 3);
}

#[tokio::test]
async fn test_leaderboards_do_not_retry() {
    let market = MockMarket::start().await;
    seed_reports(&market);

    let client = market.client();
    let query = AnalyticsQuery::new(
        Period::Monthly,
        Period::Monthly.default_range(Utc::now().date_naive()),
    );
    client.get_most_selling_products(query).await.unwrap();
    assert_eq!(
        market.calls_to("GET /analytics/revenue/most-selling-products"),
        1
    );
}

// ============================================================================
// Commission reports
// ============================================================================

#[tokio::test]
async fn test_commission_panel_loads_all_three_reports() {
    let market = MockMarket::start().await;
    market.set_system_commission(json!({
        "totalSales": "52000.00",
        "totalCommission": "5200.00",
        "effectiveRate": 0.1
    }));
    market.set_item_commission(json!([
        { "productID": 9, "productName": "Woven Basket", "sales": "900.00", "commission": "90.00" }
    ]));
    market.set_category_commission(json!([
        { "category": "Ceramics", "sales": "31000.00", "commission": "3100.00" }
    ]));

    let mut panel = CommissionPanel::new(market.client());
    panel.refresh().await;

    assert!(panel.error().is_none());
    assert_eq!(panel.system().unwrap().effective_rate, Some(0.1));
    assert_eq!(panel.items().len(), 1);
    assert_eq!(panel.categories()[0].category, "Ceramics");

    // All three went out with the same from/to window.
    let window = panel.window();
    let suffix = format!("from_date={}&to_date={}", window.from_date, window.to_date);
    for path in [
        "GET /admin/reports/system-commission",
        "GET /admin/reports/item-commission",
        "GET /admin/reports/category-commission",
    ] {
        assert!(
            market
                .request_log()
                .contains(&format!("{path}?{suffix}")),
            "missing {path} with the panel's window"
        );
    }
}
