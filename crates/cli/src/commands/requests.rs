//! After-sale request commands.
//!
//! # Usage
//!
//! ```bash
//! # Pending returns only ("category" narrows by request type)
//! tc-cli requests list --status pending --category return
//!
//! tc-cli requests set-status REQ007 approved --notes "Photos confirm damage"
//! ```

use terracotta_admin::components::{FilterState, ListController};
use terracotta_admin::market::RequestSource;
use terracotta_admin::state::AppState;
use terracotta_core::{RequestId, RequestStatus};

use super::CommandError;

/// List after-sale requests.
pub async fn list(state: &AppState, filters: FilterState) -> Result<(), CommandError> {
    let mut controller = ListController::new(RequestSource::new(state.market().clone()));
    controller.set_filters(filters);
    controller.fetch().await;
    render(&controller);
    if let Some(error) = controller.error() {
        state.toasts().error(format!("request list failed: {error}"));
    }
    Ok(())
}

/// Move a request to a new status.
pub async fn set_status(
    state: &AppState,
    id: RequestId,
    status: &str,
    notes: Option<String>,
) -> Result<(), CommandError> {
    let status: RequestStatus = status.parse()?;
    let mut controller = ListController::new(RequestSource::new(state.market().clone()));

    let market = state.market().clone();
    let updated = controller
        .mutate(market.update_request_status(&id, status, notes))
        .await?;

    state.toasts().success(format!(
        "request {} is now {}",
        updated.request_id, updated.status
    ));
    Ok(())
}

fn render(controller: &ListController<RequestSource>) {
    if let Some(error) = controller.error() {
        tracing::warn!("showing last known data: {error}");
    }
    let records = controller.records();
    #[allow(clippy::print_stdout)]
    {
        println!(
            "{:<10} {:<10} {:<20} {:<10} {:<12} {:<30}",
            "ID", "ORDER", "CUSTOMER", "TYPE", "STATUS", "REASON"
        );
        for request in records {
            println!(
                "{:<10} {:<10} {:<20} {:<10} {:<12} {:<30}",
                request.request_id.to_string(),
                request
                    .order_id
                    .as_ref()
                    .map_or_else(String::new, ToString::to_string),
                request.customer.as_deref().unwrap_or(""),
                request.kind.to_string(),
                request.status.to_string(),
                request.reason.as_deref().unwrap_or(""),
            );
        }
        println!(
            "{} of {} requests shown",
            records.len(),
            controller.all_records().len()
        );
    }
}
