//! Order management commands.
//!
//! # Usage
//!
//! ```bash
//! tc-cli orders list --status pending --from 2026-08-01 --to 2026-08-23
//! tc-cli orders cancel ORD001 --yes
//! ```

use terracotta_admin::components::{ActionTarget, ConfirmDialog, FilterState, ListController};
use terracotta_admin::market::OrderSource;
use terracotta_admin::state::AppState;
use terracotta_core::OrderId;

use super::CommandError;

/// List orders.
pub async fn list(state: &AppState, filters: FilterState) -> Result<(), CommandError> {
    let mut controller = ListController::new(OrderSource::new(state.market().clone()));
    controller.set_filters(filters);
    controller.fetch().await;
    render(&controller);
    if let Some(error) = controller.error() {
        state.toasts().error(format!("order list failed: {error}"));
    }
    Ok(())
}

/// Cancel an order on the customer's behalf, prompting first.
pub async fn cancel(state: &AppState, id: OrderId, assume_yes: bool) -> Result<(), CommandError> {
    let mut controller = ListController::new(OrderSource::new(state.market().clone()));
    controller.fetch().await;

    let known = controller.all_records().iter().find(|o| o.id == id);
    if known.is_some_and(|order| !order.can_cancel) {
        tracing::warn!("server reports order {id} is not cancellable; trying anyway");
    }

    let mut dialog = ConfirmDialog::new();
    dialog.open(ActionTarget::new(
        id.to_string(),
        format!("Cancel order {id}"),
    ));

    if !super::confirmed(&format!("Cancel order {id}?"), assume_yes) {
        dialog.cancel();
        tracing::info!("aborted");
        return Ok(());
    }

    let market = state.market().clone();
    dialog
        .confirm(|_target| controller.mutate(market.cancel_order(&id)))
        .await?;

    state.toasts().success(format!("order {id} cancelled"));
    Ok(())
}

fn render(controller: &ListController<OrderSource>) {
    if let Some(error) = controller.error() {
        tracing::warn!("showing last known data: {error}");
    }
    let records = controller.records();
    #[allow(clippy::print_stdout)]
    {
        println!(
            "{:<10} {:<22} {:>10} {:<12} {:<10} {:<10} {:<6}",
            "ID", "CUSTOMER", "AMOUNT", "STATUS", "PAYMENT", "PAID", "CANCEL"
        );
        for order in records {
            println!(
                "{:<10} {:<22} {:>10} {:<12} {:<10} {:<10} {:<6}",
                order.id.to_string(),
                order.customer_name,
                order.amount.to_string(),
                order.status,
                order.payment_method,
                order.payment_status,
                if order.can_cancel { "yes" } else { "no" },
            );
        }
        println!(
            "{} of {} orders shown",
            records.len(),
            controller.all_records().len()
        );
    }
}
