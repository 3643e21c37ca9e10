//! End-to-end tests for the product moderation screen.
//!
//! Each test drives the real list controller and API client against the
//! in-process mock marketplace; nothing external is required.

#![allow(clippy::unwrap_used)]

use serde_json::json;

use terracotta_admin::components::{EditDialog, FilterState, ListController, ListPhase};
use terracotta_admin::market::types::ApprovalUpdate;
use terracotta_admin::market::{CatalogScope, ProductSource};
use terracotta_core::{ApprovalStatus, ProductId};
use terracotta_integration_tests::MockMarket;

fn seed_catalog(market: &MockMarket) {
    market.set_products(json!([
        {
            "id": 123,
            "productName": "Glazed Mug",
            "price": "45.00",
            "quantity": 12,
            "category": "Ceramics",
            "approval_status": "pending"
        },
        {
            "id": 456,
            "productName": "Linen Scarf",
            "price": "80.00",
            "quantity": 4,
            "category": "Textiles",
            "approval_status": "approved"
        }
    ]));
}

// ============================================================================
// Listing & Filtering
// ============================================================================

#[tokio::test]
async fn test_admin_listing_includes_every_status() {
    let market = MockMarket::start().await;
    seed_catalog(&market);

    let mut products =
        ListController::new(ProductSource::new(market.client(), CatalogScope::Admin));
    products.fetch().await;

    assert_eq!(products.records().len(), 2);
    assert_eq!(products.phase(), ListPhase::Ready);
    assert!(market.request_log().contains(&"GET /admin/products".to_owned()));
}

#[tokio::test]
async fn test_public_listing_carries_approved_only() {
    let market = MockMarket::start().await;
    seed_catalog(&market);

    let mut products =
        ListController::new(ProductSource::new(market.client(), CatalogScope::Public));
    products.fetch().await;

    assert_eq!(products.records().len(), 1);
    assert_eq!(products.records()[0].id, ProductId::new(456));
    assert!(market.request_log().contains(&"GET /products".to_owned()));
}

#[tokio::test]
async fn test_status_filter_narrows_to_pending() {
    let market = MockMarket::start().await;
    seed_catalog(&market);

    let mut products =
        ListController::new(ProductSource::new(market.client(), CatalogScope::Admin));
    products.fetch().await;
    let listing_calls = market.calls_to("GET /admin/products");

    products.set_filters(FilterState::new().with_status("pending"));
    assert_eq!(products.records().len(), 1);
    assert_eq!(products.records()[0].id, ProductId::new(123));

    // Filtering is a local derivation; no request went out.
    assert_eq!(market.calls_to("GET /admin/products"), listing_calls);
}

#[tokio::test]
async fn test_search_matches_stringified_id() {
    let market = MockMarket::start().await;
    seed_catalog(&market);

    let mut products =
        ListController::new(ProductSource::new(market.client(), CatalogScope::Admin));
    products.fetch().await;

    products.set_filters(FilterState::new().with_search("123"));
    assert_eq!(products.records().len(), 1);
    assert_eq!(products.records()[0].name, "Glazed Mug");
}

// ============================================================================
// Refresh failure handling
// ============================================================================

#[tokio::test]
async fn test_failed_refresh_keeps_stale_rows() {
    let market = MockMarket::start().await;
    seed_catalog(&market);

    let mut products =
        ListController::new(ProductSource::new(market.client(), CatalogScope::Admin));
    products.fetch().await;
    assert_eq!(products.records().len(), 2);

    market.fail_listings(true);
    products.fetch().await;

    assert_eq!(products.records().len(), 2, "stale rows must survive");
    assert!(products.error().unwrap().contains("database unavailable"));
    assert_eq!(products.phase(), ListPhase::Ready);

    market.fail_listings(false);
    products.retry().await;
    assert!(products.error().is_none());
}

// ============================================================================
// Moderation mutations
// ============================================================================

#[tokio::test]
async fn test_reject_then_refetch_shows_server_state() {
    let market = MockMarket::start().await;
    seed_catalog(&market);
    let client = market.client();

    let mut products =
        ListController::new(ProductSource::new(client.clone(), CatalogScope::Admin));
    products.fetch().await;

    products
        .mutate(client.set_product_approval(ProductId::new(123), ApprovalStatus::Rejected))
        .await
        .expect("rejection should succeed");

    let mug = products
        .all_records()
        .iter()
        .find(|p| p.id == ProductId::new(123))
        .expect("rejected product still listed");
    assert_eq!(mug.approval_status, ApprovalStatus::Rejected);

    let log = market.request_log();
    let put_at = log
        .iter()
        .position(|line| line == "PUT /products/123")
        .expect("status change was issued");
    let refetch_at = log
        .iter()
        .rposition(|line| line == "GET /admin/products")
        .expect("listing was refetched");
    assert!(put_at < refetch_at, "mutation must precede the refetch");
}

#[tokio::test]
async fn test_delete_removes_listing() {
    let market = MockMarket::start().await;
    seed_catalog(&market);
    let client = market.client();

    let mut products =
        ListController::new(ProductSource::new(client.clone(), CatalogScope::Admin));
    products.fetch().await;

    products
        .remove(client.delete_product(ProductId::new(456)))
        .await
        .expect("deletion should succeed");
    assert_eq!(products.records().len(), 1);

    // Deleting again fails, but the refetch still happens.
    let listing_calls = market.calls_to("GET /admin/products");
    let outcome = products.remove(client.delete_product(ProductId::new(456))).await;
    assert!(outcome.is_err());
    assert_eq!(market.calls_to("GET /admin/products"), listing_calls + 1);
}

// ============================================================================
// Edit dialog
// ============================================================================

#[tokio::test]
async fn test_edit_dialog_patches_list_without_refetch() {
    let market = MockMarket::start().await;
    seed_catalog(&market);
    let client = market.client();

    let mut controller =
        ListController::new(ProductSource::new(client.clone(), CatalogScope::Admin));
    controller.fetch().await;
    let products = std::sync::Arc::new(std::sync::Mutex::new(controller));

    let list = std::sync::Arc::clone(&products);
    let mut dialog = EditDialog::new(ProductSource::new(client, CatalogScope::Admin))
        .on_save(move |updated| {
            list.lock().unwrap().patch_local(updated);
        });

    dialog.open(ProductId::new(123)).await;
    assert_eq!(dialog.record().unwrap().approval_status, ApprovalStatus::Pending);

    dialog
        .save(&ApprovalUpdate {
            approval_status: ApprovalStatus::Approved,
        })
        .await
        .expect("save should succeed");
    assert!(!dialog.is_open());

    let products = products.lock().unwrap();
    let mug = products
        .all_records()
        .iter()
        .find(|p| p.id == ProductId::new(123))
        .unwrap();
    assert_eq!(mug.approval_status, ApprovalStatus::Approved);

    // The save patched the list in place; the listing was fetched once.
    assert_eq!(market.calls_to("GET /admin/products"), 1);
}
