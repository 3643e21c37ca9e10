//! Store verification commands.
//!
//! # Usage
//!
//! ```bash
//! tc-cli stores list --status pending
//! tc-cli stores documents ST010
//! tc-cli stores seller ST010
//! tc-cli stores approve ST010
//! tc-cli stores reject ST010 --reason "TIN does not match registry"
//! ```

use terracotta_admin::components::{FilterState, ListController};
use terracotta_admin::market::StoreSource;
use terracotta_admin::state::AppState;
use terracotta_core::StoreId;

use super::CommandError;

/// List stores in the verification queue.
pub async fn list(state: &AppState, filters: FilterState) -> Result<(), CommandError> {
    let mut controller = ListController::new(StoreSource::new(state.market().clone()));
    controller.set_filters(filters);
    controller.fetch().await;
    render(&controller);
    if let Some(error) = controller.error() {
        state.toasts().error(format!("store list failed: {error}"));
    }
    Ok(())
}

/// Approve a store's verification application.
pub async fn approve(state: &AppState, id: StoreId) -> Result<(), CommandError> {
    let mut controller = ListController::new(StoreSource::new(state.market().clone()));
    let market = state.market().clone();
    controller.mutate(market.approve_store(&id)).await?;
    state.toasts().success(format!("store {id} approved"));
    Ok(())
}

/// Reject a store's verification application.
pub async fn reject(state: &AppState, id: StoreId, reason: String) -> Result<(), CommandError> {
    let mut controller = ListController::new(StoreSource::new(state.market().clone()));
    let market = state.market().clone();
    controller.mutate(market.reject_store(&id, reason)).await?;
    state.toasts().success(format!("store {id} rejected"));
    Ok(())
}

/// List the documents behind a store's application.
pub async fn documents(state: &AppState, id: &StoreId) -> Result<(), CommandError> {
    let documents = state.market().get_store_documents(id).await?;
    #[allow(clippy::print_stdout)]
    {
        if documents.is_empty() {
            println!("no documents on file for {id}");
        }
        for document in &documents {
            match document.uploaded_at {
                Some(uploaded) => {
                    println!("{} ({}) {}", document.name, uploaded.date_naive(), document.url);
                }
                None => println!("{} {}", document.name, document.url),
            }
        }
    }
    Ok(())
}

/// Show the seller background behind a store's application.
pub async fn seller(state: &AppState, id: &StoreId) -> Result<(), CommandError> {
    let details = state.market().get_seller_details(id).await?;
    #[allow(clippy::print_stdout)]
    {
        println!("Owner: {}", details.owner_name);
        if let Some(email) = &details.email {
            println!("Email: {email}");
        }
        if let Some(phone) = &details.phone {
            println!("Phone: {phone}");
        }
        if let Some(bio) = &details.bio {
            println!("Bio:   {bio}");
        }
    }
    Ok(())
}

fn render(controller: &ListController<StoreSource>) {
    if let Some(error) = controller.error() {
        tracing::warn!("showing last known data: {error}");
    }
    let records = controller.records();
    #[allow(clippy::print_stdout)]
    {
        println!(
            "{:<8} {:<24} {:<20} {:<12} {:<10} {:<12}",
            "ID", "STORE", "OWNER", "TIN", "STATUS", "SUBMITTED"
        );
        for store in records {
            println!(
                "{:<8} {:<24} {:<20} {:<12} {:<10} {:<12}",
                store.store_id.to_string(),
                store.name,
                store.owner,
                store.tin.as_deref().unwrap_or(""),
                store.status.to_string(),
                store
                    .submitted_at
                    .map_or_else(String::new, |ts| ts.date_naive().to_string()),
            );
        }
        println!(
            "{} of {} stores shown",
            records.len(),
            controller.all_records().len()
        );
    }
}
