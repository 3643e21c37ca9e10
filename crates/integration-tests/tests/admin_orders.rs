//! End-to-end tests for the order oversight screen.
//!
//! Cancellation is the only order mutation, and it always flows through the
//! confirmation prompt; these tests pin down the request sequence and the
//! prompt's behavior on both outcomes.

#![allow(clippy::unwrap_used)]

use serde_json::json;

use terracotta_admin::components::{ActionTarget, ConfirmDialog, ListController};
use terracotta_admin::market::OrderSource;
use terracotta_core::OrderId;
use terracotta_integration_tests::MockMarket;

fn seed_orders(market: &MockMarket) {
    market.set_orders(json!([
        {
            "id": "ORD001",
            "customerName": "Jules Ferrand",
            "amount": "120.00",
            "status": "pending",
            "paymentMethod": "card",
            "paymentStatus": "paid",
            "canCancel": true
        },
        {
            "id": "ORD002",
            "customerName": "Mara Voss",
            "amount": "45.00",
            "status": "delivered",
            "paymentMethod": "cod",
            "paymentStatus": "paid",
            "canCancel": false
        }
    ]));
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancel_posts_then_refetch_shows_server_status() {
    let market = MockMarket::start().await;
    seed_orders(&market);
    let client = market.client();

    let mut orders = ListController::new(OrderSource::new(client.clone()));
    orders.fetch().await;

    let mut prompt = ConfirmDialog::new();
    prompt.open(ActionTarget::new("ORD001", "Cancel order ORD001"));
    let confirmed = prompt
        .confirm(|target| {
            let client = client.clone();
            async move { client.cancel_order(&OrderId::new(target.id)).await }
        })
        .await;
    assert!(confirmed.is_ok());
    assert!(!prompt.is_open());

    orders.fetch().await;
    let cancelled = orders
        .records()
        .iter()
        .find(|o| o.id == OrderId::new("ORD001"))
        .unwrap();
    // The status is the server's, not a client guess.
    assert_eq!(cancelled.status, "cancelled");
    assert!(!cancelled.can_cancel);

    let log = market.request_log();
    let cancel_at = log
        .iter()
        .position(|line| line == "POST /orders-test/ORD001/cancel")
        .expect("cancellation was issued");
    let refetch_at = log
        .iter()
        .rposition(|line| line == "GET /orders-test")
        .expect("listing was refetched");
    assert!(cancel_at < refetch_at);
}

#[tokio::test]
async fn test_rejected_cancel_surfaces_reason_and_closes_prompt() {
    let market = MockMarket::start().await;
    seed_orders(&market);
    market.reject_cancels(true);
    let client = market.client();

    let mut prompt = ConfirmDialog::new();
    prompt.open(ActionTarget::new("ORD001", "Cancel order ORD001"));
    let outcome = prompt
        .confirm(|target| {
            let client = client.clone();
            async move { client.cancel_order(&OrderId::new(target.id)).await }
        })
        .await;

    let err = outcome.expect_err("server rejected the cancellation");
    assert!(err.to_string().contains("order already shipped"));
    assert!(!prompt.is_open(), "prompt must close on failure too");
    assert!(!prompt.is_busy());

    // The order is untouched server-side.
    let mut orders = ListController::new(OrderSource::new(market.client()));
    orders.fetch().await;
    assert_eq!(orders.records()[0].status, "pending");
}

#[tokio::test]
async fn test_cancel_is_never_retried() {
    let market = MockMarket::start().await;
    seed_orders(&market);
    market.reject_cancels(true);

    let client = market.client();
    let outcome = client.cancel_order(&OrderId::new("ORD001")).await;
    assert!(outcome.is_err());
    assert_eq!(market.calls_to("POST /orders-test/ORD001/cancel"), 1);
}

#[tokio::test]
async fn test_cancel_unknown_order_is_not_found() {
    let market = MockMarket::start().await;
    seed_orders(&market);

    let client = market.client();
    let outcome = client.cancel_order(&OrderId::new("ORD999")).await;
    assert!(outcome
        .expect_err("unknown order")
        .to_string()
        .contains("not found"));
}
