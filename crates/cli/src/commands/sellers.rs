//! Seller account commands.
//!
//! # Usage
//!
//! ```bash
//! tc-cli sellers list --status active --search kiln
//! tc-cli sellers show S042
//! tc-cli sellers update S042 --business-name "Kiln & Loom Studio"
//! ```

use terracotta_admin::components::{EditDialog, FilterState, ListController};
use terracotta_admin::market::SellerSource;
use terracotta_admin::market::types::{Seller, SellerDraft};
use terracotta_admin::state::AppState;
use terracotta_core::SellerId;

use super::CommandError;

/// List seller accounts.
pub async fn list(state: &AppState, filters: FilterState) -> Result<(), CommandError> {
    let mut controller = ListController::new(SellerSource::new(state.market().clone()));
    controller.set_filters(filters);
    controller.fetch().await;
    render(&controller);
    if let Some(error) = controller.error() {
        state.toasts().error(format!("seller list failed: {error}"));
    }
    Ok(())
}

/// Show one seller in full.
pub async fn show(state: &AppState, id: &SellerId) -> Result<(), CommandError> {
    let seller = state.market().get_seller(id).await?;
    render_detail(&seller);
    Ok(())
}

/// Update a seller's editable fields through the edit dialog.
pub async fn update(
    state: &AppState,
    id: SellerId,
    draft: SellerDraft,
) -> Result<(), CommandError> {
    let mut dialog = EditDialog::new(SellerSource::new(state.market().clone()));

    dialog.open(id).await;
    if let Some(error) = dialog.error() {
        tracing::warn!("could not load current record: {error}");
    } else if let Some(current) = dialog.record() {
        tracing::info!("editing {} ({})", current.business_name, current.seller_id);
    }

    let updated = dialog.save(&draft).await?;
    state
        .toasts()
        .success(format!("seller {} updated", updated.seller_id));
    render_detail(&updated);
    Ok(())
}

fn render(controller: &ListController<SellerSource>) {
    if let Some(error) = controller.error() {
        tracing::warn!("showing last known data: {error}");
    }
    let records = controller.records();
    #[allow(clippy::print_stdout)]
    {
        println!(
            "{:<8} {:<24} {:<20} {:<10} {:>12} {:>7} {:>6}",
            "ID", "BUSINESS", "OWNER", "STATUS", "REVENUE", "ORDERS", "RATING"
        );
        for seller in records {
            println!(
                "{:<8} {:<24} {:<20} {:<10} {:>12} {:>7} {:>6.1}",
                seller.seller_id.to_string(),
                seller.business_name,
                seller.owner_name,
                seller.status,
                seller.revenue.to_string(),
                seller.total_orders,
                seller.rating,
            );
        }
        println!(
            "{} of {} sellers shown",
            records.len(),
            controller.all_records().len()
        );
    }
}

fn render_detail(seller: &Seller) {
    #[allow(clippy::print_stdout)]
    {
        println!("ID:       {}", seller.seller_id);
        println!("Business: {}", seller.business_name);
        println!("Owner:    {}", seller.owner_name);
        if let Some(email) = &seller.email {
            println!("Email:    {email}");
        }
        if let Some(phone) = &seller.phone {
            println!("Phone:    {phone}");
        }
        println!("Status:   {}", seller.status);
        println!("Revenue:  {}", seller.revenue);
        println!("Orders:   {}", seller.total_orders);
        println!("Rating:   {:.1}", seller.rating);
        if let Some(joined) = seller.joined_at {
            println!("Joined:   {}", joined.date_naive());
        }
    }
}
