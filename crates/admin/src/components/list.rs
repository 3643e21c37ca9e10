//! The shared list screen controller.
//!
//! Every admin table (products, sellers, customers, orders, requests,
//! stores) runs on the same state machine: fetch the full collection,
//! filter it locally, and refetch after every mutation. The controller
//! is deliberately pessimistic about server state; the single optimistic
//! path is [`ListController::patch_local`], used when an edit dialog
//! already holds the server's updated record.

use std::future::Future;

use crate::components::filter::{FilterState, Filterable, filter_records};
use crate::market::ApiError;

/// Supplies the full collection behind one list screen.
pub trait ListSource {
    /// The record type the screen lists.
    type Entity: Filterable + Clone;

    /// Fetch the entire collection.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Self::Entity>, ApiError>> + Send;
}

/// What the screen should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// A fetch is in flight; render the spinner placeholder, not stale rows.
    Loading,
    /// Loaded (or failed) with nothing passing the filters.
    Empty,
    /// Records available to render.
    Ready,
}

/// State machine for one list screen.
pub struct ListController<S: ListSource> {
    source: S,
    all: Vec<S::Entity>,
    filtered: Vec<S::Entity>,
    filters: FilterState,
    loading: bool,
    error: Option<String>,
}

impl<S: ListSource> ListController<S> {
    /// A controller with no data yet; call [`fetch`](Self::fetch) to load.
    pub fn new(source: S) -> Self {
        Self {
            source,
            all: Vec::new(),
            filtered: Vec::new(),
            filters: FilterState::new(),
            loading: false,
            error: None,
        }
    }

    /// Reload the collection from the source.
    ///
    /// On success the previous data is replaced wholesale and any earlier
    /// error is cleared. On failure the previous data stays on screen and
    /// the error message is surfaced via [`error`](Self::error); the list
    /// never blanks because a refresh failed.
    pub async fn fetch(&mut self) {
        self.loading = true;
        match self.source.fetch_all().await {
            Ok(records) => {
                self.all = records;
                self.refilter();
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Refetch after a failed load; the inline error panel's retry action.
    pub async fn retry(&mut self) {
        self.fetch().await;
    }

    /// Run a mutation, then refetch the collection.
    ///
    /// The refetch happens whether or not the mutation succeeded, so the
    /// screen reflects whatever the server actually did. The mutation's
    /// own outcome is returned for the caller to surface.
    pub async fn mutate<T>(
        &mut self,
        op: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        let outcome = op.await;
        self.fetch().await;
        outcome
    }

    /// Run a deletion, then refetch the collection.
    pub async fn remove(
        &mut self,
        op: impl Future<Output = Result<(), ApiError>>,
    ) -> Result<(), ApiError> {
        self.mutate(op).await
    }

    /// Replace one record in place, without a refetch.
    ///
    /// Records are matched by [`Filterable::record_id`]. Returns whether a
    /// record was replaced; an unknown ID leaves the list untouched.
    pub fn patch_local(&mut self, record: S::Entity) -> bool {
        let id = record.record_id();
        let Some(slot) = self.all.iter_mut().find(|r| r.record_id() == id) else {
            return false;
        };
        *slot = record;
        self.refilter();
        true
    }

    /// Replace the active filters and re-derive the visible records.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.refilter();
    }

    /// Drop every active filter.
    pub fn clear_filters(&mut self) {
        self.set_filters(FilterState::new());
    }

    fn refilter(&mut self) {
        self.filtered = filter_records(&self.all, &self.filters);
    }

    /// The records passing the active filters, in server order.
    #[must_use]
    pub fn records(&self) -> &[S::Entity] {
        &self.filtered
    }

    /// The full unfiltered collection.
    #[must_use]
    pub fn all_records(&self) -> &[S::Entity] {
        &self.all
    }

    /// The active filters.
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last fetch error, cleared by the next successful fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// What the screen should render.
    ///
    /// `Loading` wins whenever a fetch is in flight; rows loaded earlier
    /// are held back rather than rendered mid-refresh.
    #[must_use]
    pub fn phase(&self) -> ListPhase {
        if self.loading {
            ListPhase::Loading
        } else if self.filtered.is_empty() {
            ListPhase::Empty
        } else {
            ListPhase::Ready
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        status: &'static str,
    }

    impl Filterable for Row {
        fn record_id(&self) -> String {
            self.id.to_string()
        }

        fn status_label(&self) -> Option<&str> {
            Some(self.status)
        }

        fn search_fields(&self) -> Vec<String> {
            vec![self.id.to_string()]
        }
    }

    /// Serves a scripted sequence of fetch outcomes.
    struct Script {
        responses: Mutex<VecDeque<Result<Vec<Row>, ApiError>>>,
    }

    impl Script {
        fn new(responses: Vec<Result<Vec<Row>, ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
            }
        }
    }

    impl ListSource for Script {
        type Entity = Row;

        async fn fetch_all(&self) -> Result<Vec<Row>, ApiError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn server_error() -> ApiError {
        ApiError::Api {
            status: 500,
            message: "backend down".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_fetch_replaces_wholesale() {
        let mut controller = ListController::new(Script::new(vec![
            Ok(vec![Row { id: 1, status: "pending" }, Row { id: 2, status: "approved" }]),
            Ok(vec![Row { id: 3, status: "pending" }]),
        ]));

        controller.fetch().await;
        assert_eq!(controller.records().len(), 2);

        controller.fetch().await;
        let ids: Vec<i64> = controller.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_data() {
        let mut controller = ListController::new(Script::new(vec![
            Ok(vec![Row { id: 1, status: "pending" }]),
            Err(server_error()),
        ]));

        controller.fetch().await;
        assert!(controller.error().is_none());

        controller.fetch().await;
        assert_eq!(controller.records().len(), 1, "stale data must survive");
        assert!(controller.error().unwrap().contains("backend down"));
        assert_eq!(controller.phase(), ListPhase::Ready);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_a_failed_load() {
        let mut controller = ListController::new(Script::new(vec![
            Err(server_error()),
            Ok(vec![Row { id: 1, status: "pending" }]),
        ]));

        controller.fetch().await;
        assert!(controller.error().is_some());
        assert_eq!(controller.phase(), ListPhase::Empty);

        controller.retry().await;
        assert!(controller.error().is_none());
        assert_eq!(controller.phase(), ListPhase::Ready);
    }

    #[tokio::test]
    async fn test_filters_apply_without_fetching() {
        let mut controller = ListController::new(Script::new(vec![Ok(vec![
            Row { id: 1, status: "pending" },
            Row { id: 2, status: "approved" },
        ])]));
        controller.fetch().await;

        controller.set_filters(FilterState::new().with_status("pending"));
        let ids: Vec<i64> = controller.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(controller.all_records().len(), 2);

        controller.clear_filters();
        assert_eq!(controller.records().len(), 2);
    }

    #[tokio::test]
    async fn test_mutate_refetches_even_on_failure() {
        let mut controller = ListController::new(Script::new(vec![
            Ok(vec![Row { id: 1, status: "pending" }]),
            Ok(vec![Row { id: 1, status: "approved" }]),
        ]));
        controller.fetch().await;

        let outcome: Result<(), ApiError> = controller.mutate(async { Err(server_error()) }).await;
        assert!(outcome.is_err());
        // The refetch still happened and brought the server's view.
        assert_eq!(controller.records()[0].status, "approved");
    }

    #[tokio::test]
    async fn test_mutate_returns_operation_result() {
        let mut controller =
            ListController::new(Script::new(vec![Ok(vec![]), Ok(vec![])]));
        controller.fetch().await;

        let outcome = controller.mutate(async { Ok(42) }).await;
        assert_eq!(outcome.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_patch_local_respects_filters() {
        let mut controller = ListController::new(Script::new(vec![Ok(vec![
            Row { id: 1, status: "pending" },
            Row { id: 2, status: "approved" },
        ])]));
        controller.fetch().await;
        controller.set_filters(FilterState::new().with_status("pending"));
        assert_eq!(controller.records().len(), 1);

        assert!(controller.patch_local(Row { id: 1, status: "approved" }));
        // The patched record no longer passes the active filter.
        assert!(controller.records().is_empty());
        assert_eq!(controller.all_records().len(), 2);

        assert!(!controller.patch_local(Row { id: 99, status: "pending" }));
    }

    /// Returns rows once, then leaves every later fetch suspended.
    struct StallAfterFirst {
        first: Mutex<Option<Vec<Row>>>,
    }

    impl ListSource for StallAfterFirst {
        type Entity = Row;

        async fn fetch_all(&self) -> Result<Vec<Row>, ApiError> {
            let first = self.first.lock().unwrap().take();
            match first {
                Some(rows) => Ok(rows),
                None => std::future::pending().await,
            }
        }
    }

    #[tokio::test]
    async fn test_refresh_in_flight_reports_loading_over_stale_rows() {
        let mut controller = ListController::new(StallAfterFirst {
            first: Mutex::new(Some(vec![Row { id: 1, status: "pending" }])),
        });
        controller.fetch().await;
        assert_eq!(controller.phase(), ListPhase::Ready);

        {
            let mut refresh = std::pin::pin!(controller.fetch());
            let mut cx = std::task::Context::from_waker(std::task::Waker::noop());
            assert!(refresh.as_mut().poll(&mut cx).is_pending());
        }
        // The borrow ends with the suspended future, but the flag it set is
        // exactly what a bound view reads mid-refresh.
        assert!(controller.is_loading());
        assert_eq!(controller.phase(), ListPhase::Loading);
        assert_eq!(controller.records().len(), 1, "rows are held, not dropped");
    }

    #[tokio::test]
    async fn test_phase_transitions() {
        let mut controller = ListController::new(Script::new(vec![Ok(vec![Row {
            id: 1,
            status: "pending",
        }])]));
        assert_eq!(controller.phase(), ListPhase::Empty);

        controller.fetch().await;
        assert_eq!(controller.phase(), ListPhase::Ready);

        controller.set_filters(FilterState::new().with_status("rejected"));
        assert_eq!(controller.phase(), ListPhase::Empty);
    }
}
