//! End-to-end tests for the after-sale request review screen.

#![allow(clippy::unwrap_used)]

use serde_json::json;

use terracotta_admin::components::{FilterState, ListController};
use terracotta_admin::market::RequestSource;
use terracotta_core::{RequestId, RequestStatus, RequestType};
use terracotta_integration_tests::MockMarket;

fn seed_requests(market: &MockMarket) {
    market.set_requests(json!([
        {
            "request_id": "REQ001",
            "order_id": "ORD001",
            "customer": "Jules Ferrand",
            "type": "return",
            "status": "pending",
            "reason": "Glaze cracked in transit",
            "attachments": [
                { "file_name": "crack.jpg", "url": "https://cdn.example/crack.jpg" }
            ]
        },
        {
            "request_id": "REQ002",
            "order_id": "ORD002",
            "customer": "Mara Voss",
            "type": "refund",
            "status": "processing"
        },
        {
            "request_id": "REQ003",
            "type": "support",
            "status": "pending"
        }
    ]));
}

// ============================================================================
// Listing & Filtering
// ============================================================================

#[tokio::test]
async fn test_listing_decodes_every_request_kind() {
    let market = MockMarket::start().await;
    seed_requests(&market);

    let mut requests = ListController::new(RequestSource::new(market.client()));
    requests.fetch().await;

    assert_eq!(requests.records().len(), 3);
    assert_eq!(requests.records()[0].kind, RequestType::Return);
    assert_eq!(requests.records()[0].attachments.len(), 1);
    assert!(requests.records()[2].order_id.is_none());
}

#[tokio::test]
async fn test_status_and_type_filters_combine() {
    let market = MockMarket::start().await;
    seed_requests(&market);

    let mut requests = ListController::new(RequestSource::new(market.client()));
    requests.fetch().await;

    // The request type rides in the category slot of the shared filter bar.
    requests.set_filters(
        FilterState::new()
            .with_status("pending")
            .with_category("return"),
    );
    assert_eq!(requests.records().len(), 1);
    assert_eq!(requests.records()[0].request_id, RequestId::new("REQ001"));
}

#[tokio::test]
async fn test_search_reaches_linked_order_id() {
    let market = MockMarket::start().await;
    seed_requests(&market);

    let mut requests = ListController::new(RequestSource::new(market.client()));
    requests.fetch().await;

    requests.set_filters(FilterState::new().with_search("ord002"));
    assert_eq!(requests.records().len(), 1);
    assert_eq!(requests.records()[0].request_id, RequestId::new("REQ002"));
}

// ============================================================================
// Status transitions
// ============================================================================

#[tokio::test]
async fn test_approve_with_notes_then_refetch() {
    let market = MockMarket::start().await;
    seed_requests(&market);
    let client = market.client();

    let mut requests = ListController::new(RequestSource::new(client.clone()));
    requests.fetch().await;

    let updated = requests
        .mutate(client.update_request_status(
            &RequestId::new("REQ001"),
            RequestStatus::Approved,
            Some("Photos confirm damage".to_owned()),
        ))
        .await
        .expect("transition should succeed");
    assert_eq!(updated.status, RequestStatus::Approved);

    let row = requests
        .records()
        .iter()
        .find(|r| r.request_id == RequestId::new("REQ001"))
        .unwrap();
    assert_eq!(row.status, RequestStatus::Approved);
    assert_eq!(row.admin_notes.as_deref(), Some("Photos confirm damage"));

    assert!(market
        .request_log()
        .contains(&"PUT /after-sale/admin/requests/REQ001/status".to_owned()));
}

#[tokio::test]
async fn test_unknown_request_is_not_found() {
    let market = MockMarket::start().await;
    seed_requests(&market);

    let outcome = market
        .client()
        .update_request_status(&RequestId::new("REQ999"), RequestStatus::Rejected, None)
        .await;
    assert!(outcome
        .expect_err("unknown request")
        .to_string()
        .contains("not found"));
}
