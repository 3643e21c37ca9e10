//! Customer account commands.
//!
//! # Usage
//!
//! ```bash
//! tc-cli customers list --search jules
//! tc-cli customers update C100 --address "4 Market Lane"
//! ```

use terracotta_admin::components::{EditDialog, FilterState, ListController};
use terracotta_admin::market::CustomerSource;
use terracotta_admin::market::types::{Customer, CustomerDraft};
use terracotta_admin::state::AppState;
use terracotta_core::CustomerId;

use super::CommandError;

/// List customer accounts.
pub async fn list(state: &AppState, filters: FilterState) -> Result<(), CommandError> {
    let mut controller = ListController::new(CustomerSource::new(state.market().clone()));
    controller.set_filters(filters);
    controller.fetch().await;
    render(&controller);
    if let Some(error) = controller.error() {
        state
            .toasts()
            .error(format!("customer list failed: {error}"));
    }
    Ok(())
}

/// Update a customer's editable fields through the edit dialog.
pub async fn update(
    state: &AppState,
    id: CustomerId,
    draft: CustomerDraft,
) -> Result<(), CommandError> {
    let mut dialog = EditDialog::new(CustomerSource::new(state.market().clone()));

    dialog.open(id).await;
    if let Some(error) = dialog.error() {
        tracing::warn!("could not load current record: {error}");
    }

    let updated = dialog.save(&draft).await?;
    state
        .toasts()
        .success(format!("customer {} updated", updated.user_id));
    render_detail(&updated);
    Ok(())
}

fn render(controller: &ListController<CustomerSource>) {
    if let Some(error) = controller.error() {
        tracing::warn!("showing last known data: {error}");
    }
    let records = controller.records();
    #[allow(clippy::print_stdout)]
    {
        println!(
            "{:<8} {:<22} {:<28} {:>12} {:>7}",
            "ID", "NAME", "EMAIL", "SPEND", "ORDERS"
        );
        for customer in records {
            println!(
                "{:<8} {:<22} {:<28} {:>12} {:>7}",
                customer.user_id.to_string(),
                customer.name,
                customer.email.to_string(),
                customer.total_spend.to_string(),
                customer.total_orders,
            );
        }
        println!(
            "{} of {} customers shown",
            records.len(),
            controller.all_records().len()
        );
    }
}

fn render_detail(customer: &Customer) {
    #[allow(clippy::print_stdout)]
    {
        println!("ID:      {}", customer.user_id);
        println!("Name:    {}", customer.name);
        println!("Email:   {}", customer.email);
        if let Some(address) = &customer.address {
            println!("Address: {address}");
        }
        println!("Spend:   {}", customer.total_spend);
        println!("Orders:  {}", customer.total_orders);
    }
}
