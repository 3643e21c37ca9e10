//! Revenue analytics commands.
//!
//! # Usage
//!
//! ```bash
//! # Default: last 12 months, one point per month
//! tc-cli analytics revenue
//!
//! # Custom window at daily granularity
//! tc-cli analytics revenue --period daily --from 2026-06-01 --to 2026-08-23
//!
//! tc-cli analytics generate-public
//! ```

use terracotta_admin::components::AnalyticsPanel;
use terracotta_admin::market::types::{DateRange, Period};
use terracotta_admin::state::AppState;

use super::CommandError;

fn build_panel(state: &AppState, period: Option<Period>, range: Option<DateRange>) -> AnalyticsPanel {
    let mut panel = AnalyticsPanel::new(state.market().clone());
    if let Some(period) = period {
        panel = panel.with_period(period);
    }
    if let Some(range) = range {
        panel = panel.with_range(range);
    }
    panel
}

/// Show the revenue report and both leaderboards.
pub async fn revenue(
    state: &AppState,
    period: Option<Period>,
    range: Option<DateRange>,
) -> Result<(), CommandError> {
    let mut panel = build_panel(state, period, range);
    panel.refresh().await;
    render(&panel);
    if let Some(error) = panel.error() {
        state
            .toasts()
            .error(format!("analytics refresh failed: {error}"));
    }
    Ok(())
}

/// Regenerate the public analytics snapshot for the chosen window.
pub async fn generate_public(
    state: &AppState,
    period: Option<Period>,
    range: Option<DateRange>,
) -> Result<(), CommandError> {
    let panel = build_panel(state, period, range);
    panel.generate_public().await?;
    state.toasts().success("public analytics snapshot queued");
    Ok(())
}

fn render(panel: &AnalyticsPanel) {
    #[allow(clippy::print_stdout)]
    {
        let range = panel.range();
        println!(
            "Revenue ({}, {} to {})",
            panel.period(),
            range.start_date,
            range.end_date
        );

        if let Some(summary) = panel.summary() {
            println!("  Total revenue: {}", summary.total_revenue);
            println!("  Total orders:  {}", summary.total_orders);
            println!("  Average order: {}", summary.average_order_value);
            for point in &summary.series {
                println!(
                    "  {:<12} {:>12} {:>6}",
                    point.bucket,
                    point.revenue.to_string(),
                    point.orders
                );
            }
        }

        if !panel.top_products().is_empty() {
            println!("Best sellers:");
            for row in panel.top_products() {
                println!(
                    "  {:<8} {:<28} {:>6} sold {:>12}",
                    row.product_id.to_string(),
                    row.name,
                    row.units_sold,
                    row.revenue.to_string()
                );
            }
        }

        if !panel.top_sellers().is_empty() {
            println!("Top sellers:");
            for row in panel.top_sellers() {
                println!(
                    "  {:<8} {:<28} {:>6} orders {:>12}",
                    row.seller_id.to_string(),
                    row.business_name,
                    row.orders,
                    row.revenue.to_string()
                );
            }
        }
    }
}
