//! Commission report commands.
//!
//! # Usage
//!
//! ```bash
//! # Marketplace-wide totals for the trailing 30 days
//! tc-cli reports commission system
//!
//! # Per-item breakdown for July
//! tc-cli reports commission item --from 2026-07-01 --to 2026-07-31
//!
//! # All three reports in one pull
//! tc-cli reports commission all
//! ```

use terracotta_admin::components::CommissionPanel;
use terracotta_admin::market::types::{
    CategoryCommission, ItemCommission, ReportWindow, SystemCommission,
};
use terracotta_admin::state::AppState;

use super::CommandError;

/// Show the marketplace-wide commission report.
pub async fn system(state: &AppState, window: ReportWindow) -> Result<(), CommandError> {
    let report = state.market().get_system_commission(window).await?;
    render_window(window);
    render_system(&report);
    Ok(())
}

/// Show the per-item commission breakdown.
pub async fn item(state: &AppState, window: ReportWindow) -> Result<(), CommandError> {
    let rows = state.market().get_item_commission(window).await?;
    render_window(window);
    render_items(&rows);
    Ok(())
}

/// Show the per-category commission breakdown.
pub async fn category(state: &AppState, window: ReportWindow) -> Result<(), CommandError> {
    let rows = state.market().get_category_commission(window).await?;
    render_window(window);
    render_categories(&rows);
    Ok(())
}

/// Show all three commission reports in one pull.
pub async fn all(state: &AppState, window: ReportWindow) -> Result<(), CommandError> {
    let mut panel = CommissionPanel::new(state.market().clone());
    panel.set_window(window).await;
    render_window(panel.window());
    if let Some(report) = panel.system() {
        render_system(report);
    }
    render_items(panel.items());
    render_categories(panel.categories());
    if let Some(error) = panel.error() {
        state
            .toasts()
            .error(format!("commission refresh failed: {error}"));
    }
    Ok(())
}

fn render_window(window: ReportWindow) {
    #[allow(clippy::print_stdout)]
    {
        println!("Commission ({} to {})", window.from_date, window.to_date);
    }
}

fn render_system(report: &SystemCommission) {
    #[allow(clippy::print_stdout)]
    {
        println!("  Total sales:      {}", report.total_sales);
        println!("  Total commission: {}", report.total_commission);
        if let Some(rate) = report.effective_rate {
            println!("  Effective rate:   {:.2}%", rate * 100.0);
        }
        for row in &report.rows {
            println!(
                "  {:<12} {:>12} {:>12}",
                row.bucket,
                row.sales.to_string(),
                row.commission.to_string()
            );
        }
    }
}

fn render_items(rows: &[ItemCommission]) {
    if rows.is_empty() {
        return;
    }
    #[allow(clippy::print_stdout)]
    {
        println!("By item:");
        for row in rows {
            println!(
                "  {:<8} {:<28} {:>12} {:>12}",
                row.product_id.to_string(),
                row.name,
                row.sales.to_string(),
                row.commission.to_string()
            );
        }
    }
}

fn render_categories(rows: &[CategoryCommission]) {
    if rows.is_empty() {
        return;
    }
    #[allow(clippy::print_stdout)]
    {
        println!("By category:");
        for row in rows {
            println!(
                "  {:<28} {:>12} {:>12}",
                row.category,
                row.sales.to_string(),
                row.commission.to_string()
            );
        }
    }
}
