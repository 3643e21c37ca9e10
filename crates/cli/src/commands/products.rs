//! Product moderation commands.
//!
//! # Usage
//!
//! ```bash
//! # Everything awaiting review, newest filters apply locally
//! tc-cli products list --admin --status pending
//!
//! # Approve, reject, or remove a listing
//! tc-cli products approve 123
//! tc-cli products reject 123
//! tc-cli products delete 123 --yes
//! ```

use terracotta_admin::components::{ActionTarget, ConfirmDialog, FilterState, ListController};
use terracotta_admin::market::{CatalogScope, ProductSource};
use terracotta_admin::state::AppState;
use terracotta_core::{ApprovalStatus, ProductId};

use super::CommandError;

/// List products in the given catalog scope.
pub async fn list(
    state: &AppState,
    scope: CatalogScope,
    filters: FilterState,
    watch: bool,
) -> Result<(), CommandError> {
    let source = ProductSource::new(state.market().clone(), scope);
    let mut controller = ListController::new(source);
    controller.set_filters(filters);

    if watch {
        super::watch_list(state, controller, render).await;
        return Ok(());
    }

    controller.fetch().await;
    render(&controller);
    if let Some(error) = controller.error() {
        state.toasts().error(format!("product list failed: {error}"));
    }
    Ok(())
}

/// Approve or reject a product, then show the server's view of it.
pub async fn set_approval(
    state: &AppState,
    id: ProductId,
    status: ApprovalStatus,
) -> Result<(), CommandError> {
    let source = ProductSource::new(state.market().clone(), CatalogScope::Admin);
    let mut controller = ListController::new(source);

    controller
        .mutate(state.market().set_product_approval(id, status))
        .await?;

    if let Some(product) = controller.all_records().iter().find(|p| p.id == id) {
        tracing::info!("{} is now {}", product.name, product.approval_status);
    }
    state.toasts().success(format!("product {id} marked {status}"));
    Ok(())
}

/// Delete a product listing, prompting first.
pub async fn delete(state: &AppState, id: ProductId, assume_yes: bool) -> Result<(), CommandError> {
    let source = ProductSource::new(state.market().clone(), CatalogScope::Admin);
    let mut controller = ListController::new(source);
    controller.fetch().await;

    let name = controller
        .all_records()
        .iter()
        .find(|p| p.id == id)
        .map_or_else(|| id.to_string(), |p| p.name.clone());

    let mut dialog = ConfirmDialog::new();
    dialog.open(ActionTarget::new(
        id.to_string(),
        format!("Delete product {name}"),
    ));

    if !super::confirmed(&format!("Delete product {name}?"), assume_yes) {
        dialog.cancel();
        tracing::info!("aborted");
        return Ok(());
    }

    let market = state.market().clone();
    dialog
        .confirm(|_target| controller.remove(market.delete_product(id)))
        .await?;

    state.toasts().success(format!("product {id} deleted"));
    Ok(())
}

fn render(controller: &ListController<ProductSource>) {
    if let Some(error) = controller.error() {
        tracing::warn!("showing last known data: {error}");
    }
    let records = controller.records();
    #[allow(clippy::print_stdout)]
    {
        println!(
            "{:<8} {:<28} {:>10} {:>6} {:<12} {:<14}",
            "ID", "NAME", "PRICE", "QTY", "CATEGORY", "STATUS"
        );
        for product in records {
            println!(
                "{:<8} {:<28} {:>10} {:>6} {:<12} {:<14}",
                product.id.to_string(),
                product.name,
                product.price.to_string(),
                product.quantity,
                product.category,
                product.approval_status.to_string(),
            );
        }
        println!(
            "{} of {} products shown",
            records.len(),
            controller.all_records().len()
        );
    }
}
