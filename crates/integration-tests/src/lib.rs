//! In-process mock of the marketplace REST API.
//!
//! [`MockMarket`] binds an axum server to an ephemeral port, serves JSON
//! fixtures held in shared state, and records every request it sees.
//! Tests drive the real admin client against it, assert on the request
//! log, and inject the failures a live backend cannot produce on cue:
//! listing errors, rejected cancellations, and stalled analytics reads.
//!
//! ```rust,ignore
//! let market = MockMarket::start().await;
//! market.set_orders(json!([{ "id": "ORD001", ... }]));
//!
//! let client = market.client();
//! client.cancel_order(&OrderId::new("ORD001")).await?;
//!
//! assert!(market.request_log().contains(&"POST /orders-test/ORD001/cancel".to_owned()));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use terracotta_admin::config::{AdminConfig, MarketConfig};
use terracotta_admin::market::MarketClient;
use terracotta_admin::state::AppState;

/// How long a stalled response sleeps. Longer than any client timeout
/// the tests configure.
const STALL: Duration = Duration::from_secs(2);

/// A mock marketplace backend listening on an ephemeral local port.
///
/// The server is torn down when the value is dropped.
#[derive(Debug)]
pub struct MockMarket {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockMarket {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock listener");
        let addr = listener.local_addr().expect("mock listener has no address");
        let app = router(Arc::clone(&state));
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self {
            addr,
            state,
            server,
        }
    }

    /// Base URL of the running server.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a valid URL.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("mock address is a valid URL")
    }

    /// Admin configuration pointing at this mock.
    #[must_use]
    pub fn config(&self) -> AdminConfig {
        self.config_with_timeout(Duration::from_secs(5))
    }

    /// Admin configuration with a custom per-request timeout.
    #[must_use]
    pub fn config_with_timeout(&self, timeout: Duration) -> AdminConfig {
        AdminConfig {
            market: MarketConfig {
                base_url: self.url(),
                session_cookie: None,
                timeout,
            },
            refresh_interval: Duration::from_secs(60),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Admin configuration carrying a pre-issued session cookie.
    #[must_use]
    pub fn config_with_cookie(&self, cookie: SecretString) -> AdminConfig {
        let mut config = self.config();
        config.market.session_cookie = Some(cookie);
        config
    }

    /// API client wired to this mock.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be constructed.
    #[must_use]
    pub fn client(&self) -> MarketClient {
        MarketClient::new(&self.config().market).expect("failed to build client")
    }

    /// API client with a custom per-request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be constructed.
    #[must_use]
    pub fn client_with_timeout(&self, timeout: Duration) -> MarketClient {
        MarketClient::new(&self.config_with_timeout(timeout).market)
            .expect("failed to build client")
    }

    /// App state wired to this mock.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be constructed.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        AppState::new(self.config()).expect("failed to build app state")
    }

    // =========================================================================
    // Fixtures
    // =========================================================================

    /// Replace the product fixtures.
    pub fn set_products(&self, rows: Value) {
        *lock(&self.state.products) = into_rows(rows);
    }

    /// Replace the seller fixtures.
    pub fn set_sellers(&self, rows: Value) {
        *lock(&self.state.sellers) = into_rows(rows);
    }

    /// Replace the customer fixtures.
    pub fn set_customers(&self, rows: Value) {
        *lock(&self.state.customers) = into_rows(rows);
    }

    /// Replace the order fixtures.
    pub fn set_orders(&self, rows: Value) {
        *lock(&self.state.orders) = into_rows(rows);
    }

    /// Replace the after-sale request fixtures.
    pub fn set_requests(&self, rows: Value) {
        *lock(&self.state.requests) = into_rows(rows);
    }

    /// Replace the store fixtures.
    pub fn set_stores(&self, rows: Value) {
        *lock(&self.state.stores) = into_rows(rows);
    }

    /// Replace the revenue summary payload.
    pub fn set_summary(&self, summary: Value) {
        *lock(&self.state.summary) = summary;
    }

    /// Replace the best-selling products payload.
    pub fn set_top_products(&self, rows: Value) {
        *lock(&self.state.top_products) = rows;
    }

    /// Replace the top-sellers payload.
    pub fn set_top_sellers(&self, rows: Value) {
        *lock(&self.state.top_sellers) = rows;
    }

    /// Replace the system commission payload.
    pub fn set_system_commission(&self, report: Value) {
        *lock(&self.state.system_commission) = report;
    }

    /// Replace the per-item commission payload.
    pub fn set_item_commission(&self, rows: Value) {
        *lock(&self.state.item_commission) = rows;
    }

    /// Replace the per-category commission payload.
    pub fn set_category_commission(&self, rows: Value) {
        *lock(&self.state.category_commission) = rows;
    }

    /// Replace the store documents payload.
    pub fn set_documents(&self, rows: Value) {
        *lock(&self.state.documents) = rows;
    }

    /// Replace the seller-details payload.
    pub fn set_seller_details(&self, details: Value) {
        *lock(&self.state.seller_details) = details;
    }

    /// Replace the signed-in profile; `None` makes `/auth/profile` return 401.
    pub fn set_profile(&self, profile: Option<Value>) {
        *lock(&self.state.profile) = profile;
    }

    // =========================================================================
    // Failure injection
    // =========================================================================

    /// Make every listing endpoint return 500 until turned off.
    pub fn fail_listings(&self, fail: bool) {
        self.state.fail_listings.store(fail, Ordering::SeqCst);
    }

    /// Make order cancellations return 409 until turned off.
    pub fn reject_cancels(&self, reject: bool) {
        self.state.reject_cancels.store(reject, Ordering::SeqCst);
    }

    /// Stall the next `count` revenue summary reads past any client timeout.
    pub fn stall_summaries(&self, count: usize) {
        self.state.stalled_summaries.store(count, Ordering::SeqCst);
    }

    // =========================================================================
    // Observations
    // =========================================================================

    /// Every request seen so far, oldest first, as `METHOD /path?query`.
    #[must_use]
    pub fn request_log(&self) -> Vec<String> {
        lock(&self.state.log).clone()
    }

    /// Number of logged requests starting with `prefix`.
    #[must_use]
    pub fn calls_to(&self, prefix: &str) -> usize {
        lock(&self.state.log)
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }

    /// Every `Cookie` header value seen so far.
    #[must_use]
    pub fn seen_cookies(&self) -> Vec<String> {
        lock(&self.state.cookies).clone()
    }
}

impl Drop for MockMarket {
    fn drop(&mut self) {
        self.server.abort();
    }
}

#[derive(Debug)]
struct MockState {
    products: Mutex<Vec<Value>>,
    sellers: Mutex<Vec<Value>>,
    customers: Mutex<Vec<Value>>,
    orders: Mutex<Vec<Value>>,
    requests: Mutex<Vec<Value>>,
    stores: Mutex<Vec<Value>>,
    summary: Mutex<Value>,
    top_products: Mutex<Value>,
    top_sellers: Mutex<Value>,
    system_commission: Mutex<Value>,
    item_commission: Mutex<Value>,
    category_commission: Mutex<Value>,
    documents: Mutex<Value>,
    seller_details: Mutex<Value>,
    profile: Mutex<Option<Value>>,
    stalled_summaries: AtomicUsize,
    fail_listings: AtomicBool,
    reject_cancels: AtomicBool,
    log: Mutex<Vec<String>>,
    cookies: Mutex<Vec<String>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            sellers: Mutex::new(Vec::new()),
            customers: Mutex::new(Vec::new()),
            orders: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            stores: Mutex::new(Vec::new()),
            summary: Mutex::new(json!({
                "totalRevenue": "0.00",
                "totalOrders": 0,
                "averageOrderValue": "0.00",
                "series": [],
            })),
            top_products: Mutex::new(json!([])),
            top_sellers: Mutex::new(json!([])),
            system_commission: Mutex::new(json!({
                "totalSales": "0.00",
                "totalCommission": "0.00",
            })),
            item_commission: Mutex::new(json!([])),
            category_commission: Mutex::new(json!([])),
            documents: Mutex::new(json!([])),
            seller_details: Mutex::new(json!({ "ownerName": "unset" })),
            profile: Mutex::new(Some(json!({
                "userID": "ADM001",
                "name": "Site Admin",
                "email": "admin@terracotta.example",
                "role": "admin",
            }))),
            stalled_summaries: AtomicUsize::new(0),
            fail_listings: AtomicBool::new(false),
            reject_cancels: AtomicBool::new(false),
            log: Mutex::new(Vec::new()),
            cookies: Mutex::new(Vec::new()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("mock state lock poisoned")
}

fn into_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        other => vec![other],
    }
}

fn numeric_id(record: &Value) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

fn string_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

fn set_field(record: &mut Value, key: &str, value: Value) {
    if let Some(object) = record.as_object_mut() {
        object.insert(key.to_owned(), value);
    }
}

fn merge_fields(record: &mut Value, patch: &Value) {
    if let (Some(object), Some(updates)) = (record.as_object_mut(), patch.as_object()) {
        for (key, value) in updates {
            object.insert(key.clone(), value.clone());
        }
    }
}

fn count_pending(rows: &Mutex<Vec<Value>>, key: &str) -> usize {
    lock(rows)
        .iter()
        .filter(|row| string_field(row, key) == Some("pending"))
        .count()
}

fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

fn listing_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "database unavailable" })),
    )
        .into_response()
}

// =============================================================================
// Router
// =============================================================================

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/admin/products", get(list_admin_products))
        .route("/sellers", get(list_sellers))
        .route("/sellers/{id}", get(get_seller).put(update_seller))
        .route("/customers", get(list_customers))
        .route("/customers/{id}", get(get_customer).put(update_customer))
        .route("/orders-test", get(list_orders))
        .route("/orders-test/{id}/cancel", post(cancel_order))
        .route("/after-sale/admin/requests", get(list_requests))
        .route(
            "/after-sale/admin/requests/{id}/status",
            put(update_request_status),
        )
        .route("/admin/stores", get(list_stores))
        .route("/admin/stores/{id}/approve", post(approve_store))
        .route("/admin/stores/{id}/reject", post(reject_store))
        .route("/admin/stores/{id}/documents", get(store_documents))
        .route("/admin/stores/{id}/seller-details", get(store_seller_details))
        .route("/admin/verification-stats", get(verification_stats))
        .route("/analytics/test-controller", get(revenue_summary))
        .route("/analytics/revenue/most-selling-products", get(top_products))
        .route("/analytics/revenue/highest-sales-sellers", get(top_sellers))
        .route("/analytics/generate-public", post(generate_public))
        .route("/admin/reports/system-commission", get(system_commission))
        .route("/admin/reports/item-commission", get(item_commission))
        .route(
            "/admin/reports/category-commission",
            get(category_commission),
        )
        .route("/auth/profile", get(show_profile))
        .route("/user/deactivate", patch(deactivate))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
        .with_state(state)
}

async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let line = match request.uri().query() {
        Some(query) => format!("{} {}?{}", request.method(), request.uri().path(), query),
        None => format!("{} {}", request.method(), request.uri().path()),
    };
    lock(&state.log).push(line);
    if let Some(cookie) = request.headers().get(header::COOKIE) {
        if let Ok(value) = cookie.to_str() {
            lock(&state.cookies).push(value.to_owned());
        }
    }
    next.run(request).await
}

// =============================================================================
// Products
// =============================================================================

async fn list_products(State(state): State<Arc<MockState>>) -> Response {
    if state.fail_listings.load(Ordering::SeqCst) {
        return listing_failure();
    }
    // The public catalog carries approved listings only.
    let rows: Vec<Value> = lock(&state.products)
        .iter()
        .filter(|row| string_field(row, "approval_status") == Some("approved"))
        .cloned()
        .collect();
    Json(Value::Array(rows)).into_response()
}

async fn list_admin_products(State(state): State<Arc<MockState>>) -> Response {
    if state.fail_listings.load(Ordering::SeqCst) {
        return listing_failure();
    }
    Json(Value::Array(lock(&state.products).clone())).into_response()
}

async fn get_product(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> Response {
    lock(&state.products)
        .iter()
        .find(|row| numeric_id(row) == Some(id))
        .cloned()
        .map_or_else(not_found, |product| Json(product).into_response())
}

async fn update_product(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut products = lock(&state.products);
    let Some(product) = products.iter_mut().find(|row| numeric_id(row) == Some(id)) else {
        return not_found();
    };
    merge_fields(product, &body);
    StatusCode::OK.into_response()
}

async fn delete_product(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> Response {
    let mut products = lock(&state.products);
    let before = products.len();
    products.retain(|row| numeric_id(row) != Some(id));
    if products.len() == before {
        not_found()
    } else {
        StatusCode::OK.into_response()
    }
}

// =============================================================================
// Sellers and customers
// =============================================================================

async fn list_sellers(State(state): State<Arc<MockState>>) -> Response {
    if state.fail_listings.load(Ordering::SeqCst) {
        return listing_failure();
    }
    Json(Value::Array(lock(&state.sellers).clone())).into_response()
}

async fn get_seller(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    lock(&state.sellers)
        .iter()
        .find(|row| string_field(row, "sellerID") == Some(id.as_str()))
        .cloned()
        .map_or_else(not_found, |seller| Json(seller).into_response())
}

async fn update_seller(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut sellers = lock(&state.sellers);
    let Some(seller) = sellers
        .iter_mut()
        .find(|row| string_field(row, "sellerID") == Some(id.as_str()))
    else {
        return not_found();
    };
    merge_fields(seller, &body);
    Json(seller.clone()).into_response()
}

async fn list_customers(State(state): State<Arc<MockState>>) -> Response {
    if state.fail_listings.load(Ordering::SeqCst) {
        return listing_failure();
    }
    Json(Value::Array(lock(&state.customers).clone())).into_response()
}

async fn get_customer(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    lock(&state.customers)
        .iter()
        .find(|row| string_field(row, "userID") == Some(id.as_str()))
        .cloned()
        .map_or_else(not_found, |customer| Json(customer).into_response())
}

async fn update_customer(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut customers = lock(&state.customers);
    let Some(customer) = customers
        .iter_mut()
        .find(|row| string_field(row, "userID") == Some(id.as_str()))
    else {
        return not_found();
    };
    merge_fields(customer, &body);
    Json(customer.clone()).into_response()
}

// =============================================================================
// Orders
// =============================================================================

async fn list_orders(State(state): State<Arc<MockState>>) -> Response {
    if state.fail_listings.load(Ordering::SeqCst) {
        return listing_failure();
    }
    Json(Value::Array(lock(&state.orders).clone())).into_response()
}

async fn cancel_order(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    if state.reject_cancels.load(Ordering::SeqCst) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "order already shipped" })),
        )
            .into_response();
    }
    let mut orders = lock(&state.orders);
    let Some(order) = orders
        .iter_mut()
        .find(|row| string_field(row, "id") == Some(id.as_str()))
    else {
        return not_found();
    };
    set_field(order, "status", json!("cancelled"));
    set_field(order, "canCancel", json!(false));
    StatusCode::OK.into_response()
}

// =============================================================================
// After-sale requests
// =============================================================================

async fn list_requests(State(state): State<Arc<MockState>>) -> Response {
    if state.fail_listings.load(Ordering::SeqCst) {
        return listing_failure();
    }
    Json(Value::Array(lock(&state.requests).clone())).into_response()
}

async fn update_request_status(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut requests = lock(&state.requests);
    let Some(request) = requests
        .iter_mut()
        .find(|row| string_field(row, "request_id") == Some(id.as_str()))
    else {
        return not_found();
    };
    merge_fields(request, &body);
    Json(request.clone()).into_response()
}

// =============================================================================
// Store verification
// =============================================================================

async fn list_stores(State(state): State<Arc<MockState>>) -> Response {
    if state.fail_listings.load(Ordering::SeqCst) {
        return listing_failure();
    }
    Json(Value::Array(lock(&state.stores).clone())).into_response()
}

async fn approve_store(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let mut stores = lock(&state.stores);
    let Some(store) = stores
        .iter_mut()
        .find(|row| string_field(row, "storeID") == Some(id.as_str()))
    else {
        return not_found();
    };
    set_field(store, "status", json!("approved"));
    StatusCode::OK.into_response()
}

async fn reject_store(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let Some(reason) = body.get("reason").and_then(Value::as_str) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "reason is required" })),
        )
            .into_response();
    };
    let mut stores = lock(&state.stores);
    let Some(store) = stores
        .iter_mut()
        .find(|row| string_field(row, "storeID") == Some(id.as_str()))
    else {
        return not_found();
    };
    set_field(store, "status", json!("rejected"));
    set_field(store, "rejectionReason", json!(reason));
    StatusCode::OK.into_response()
}

async fn store_documents(State(state): State<Arc<MockState>>, Path(_id): Path<String>) -> Response {
    Json(lock(&state.documents).clone()).into_response()
}

async fn store_seller_details(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<String>,
) -> Response {
    Json(lock(&state.seller_details).clone()).into_response()
}

async fn verification_stats(State(state): State<Arc<MockState>>) -> Response {
    Json(json!({
        "pendingStores": count_pending(&state.stores, "status"),
        "pendingProducts": count_pending(&state.products, "approval_status"),
        "pendingRequests": count_pending(&state.requests, "status"),
    }))
    .into_response()
}

// =============================================================================
// Analytics and reports
// =============================================================================

async fn revenue_summary(State(state): State<Arc<MockState>>) -> Response {
    if take_stall(&state) {
        tokio::time::sleep(STALL).await;
    }
    Json(lock(&state.summary).clone()).into_response()
}

fn take_stall(state: &MockState) -> bool {
    state
        .stalled_summaries
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

async fn top_products(State(state): State<Arc<MockState>>) -> Response {
    Json(lock(&state.top_products).clone()).into_response()
}

async fn top_sellers(State(state): State<Arc<MockState>>) -> Response {
    Json(lock(&state.top_sellers).clone()).into_response()
}

async fn generate_public() -> StatusCode {
    StatusCode::OK
}

async fn system_commission(State(state): State<Arc<MockState>>) -> Response {
    Json(lock(&state.system_commission).clone()).into_response()
}

async fn item_commission(State(state): State<Arc<MockState>>) -> Response {
    Json(lock(&state.item_commission).clone()).into_response()
}

async fn category_commission(State(state): State<Arc<MockState>>) -> Response {
    Json(lock(&state.category_commission).clone()).into_response()
}

// =============================================================================
// Session
// =============================================================================

async fn show_profile(State(state): State<Arc<MockState>>) -> Response {
    lock(&state.profile).clone().map_or_else(
        || StatusCode::UNAUTHORIZED.into_response(),
        |profile| Json(profile).into_response(),
    )
}

async fn deactivate(State(state): State<Arc<MockState>>) -> Response {
    let mut profile = lock(&state.profile);
    if profile.is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    *profile = None;
    StatusCode::OK.into_response()
}
