//! Revenue analytics and commission report panels.
//!
//! Both panels follow the list controller's refresh discipline: replace
//! everything on success, keep stale data and surface the error on
//! failure. Changing the period or window refetches immediately.

use chrono::{NaiveDate, Utc};

use crate::market::types::{
    AnalyticsQuery, CategoryCommission, DateRange, HighestSalesSeller, ItemCommission,
    MostSellingProduct, Period, ReportWindow, RevenueSummary, SystemCommission,
};
use crate::market::{ApiError, MarketClient};

/// State machine for the revenue analytics screen.
#[derive(Debug)]
pub struct AnalyticsPanel {
    market: MarketClient,
    period: Period,
    range: DateRange,
    summary: Option<RevenueSummary>,
    top_products: Vec<MostSellingProduct>,
    top_sellers: Vec<HighestSalesSeller>,
    loading: bool,
    error: Option<String>,
}

impl AnalyticsPanel {
    /// A panel on the default monthly view, with nothing loaded yet.
    #[must_use]
    pub fn new(market: MarketClient) -> Self {
        let period = Period::default();
        let range = period.default_range(Utc::now().date_naive());
        Self {
            market,
            period,
            range,
            summary: None,
            top_products: Vec::new(),
            top_sellers: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Reload every report for the current window.
    ///
    /// The summary lands first (it is the retrying call); the two
    /// leaderboards then load concurrently. A failure anywhere keeps the
    /// previous reports on screen and surfaces the error.
    pub async fn refresh(&mut self) {
        self.loading = true;
        let query = AnalyticsQuery::new(self.period, self.range);
        match self.fetch_window(query).await {
            Ok((summary, products, sellers)) => {
                self.summary = Some(summary);
                self.top_products = products;
                self.top_sellers = sellers;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    async fn fetch_window(
        &self,
        query: AnalyticsQuery,
    ) -> Result<(RevenueSummary, Vec<MostSellingProduct>, Vec<HighestSalesSeller>), ApiError> {
        let summary = self.market.get_revenue_summary(query).await?;
        let (products, sellers) = tokio::try_join!(
            self.market.get_most_selling_products(query),
            self.market.get_highest_sales_sellers(query),
        )?;
        Ok((summary, products, sellers))
    }

    /// Start on a different granularity, window snapped to its
    /// conventional lookback. Does not fetch.
    #[must_use]
    pub fn with_period(mut self, period: Period) -> Self {
        self.apply_period(period, Utc::now().date_naive());
        self
    }

    /// Start on a custom window. Does not fetch.
    #[must_use]
    pub const fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Switch granularity; the window snaps to the period's conventional
    /// lookback and the reports reload.
    pub async fn set_period(&mut self, period: Period) {
        self.apply_period(period, Utc::now().date_naive());
        self.refresh().await;
    }

    /// Use a custom window with the current granularity and reload.
    pub async fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.refresh().await;
    }

    fn apply_period(&mut self, period: Period, today: NaiveDate) {
        self.period = period;
        self.range = period.default_range(today);
    }

    /// Ask the backend to regenerate the public analytics snapshot.
    ///
    /// Does not touch the panel's own reports.
    ///
    /// # Errors
    ///
    /// Returns the API error if the request fails.
    pub async fn generate_public(&self) -> Result<(), ApiError> {
        let query = AnalyticsQuery::new(self.period, self.range);
        self.market.generate_public_report(query).await
    }

    /// Current granularity.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Current reporting window.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// The headline report, once loaded.
    #[must_use]
    pub const fn summary(&self) -> Option<&RevenueSummary> {
        self.summary.as_ref()
    }

    /// The best-selling products leaderboard.
    #[must_use]
    pub fn top_products(&self) -> &[MostSellingProduct] {
        &self.top_products
    }

    /// The top-sellers leaderboard.
    #[must_use]
    pub fn top_sellers(&self) -> &[HighestSalesSeller] {
        &self.top_sellers
    }

    /// Whether a reload is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last refresh error, cleared by the next successful refresh.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// State machine for the commission reports screen.
#[derive(Debug)]
pub struct CommissionPanel {
    market: MarketClient,
    window: ReportWindow,
    system: Option<SystemCommission>,
    items: Vec<ItemCommission>,
    categories: Vec<CategoryCommission>,
    loading: bool,
    error: Option<String>,
}

impl CommissionPanel {
    /// A panel over the trailing 30 days, with nothing loaded yet.
    #[must_use]
    pub fn new(market: MarketClient) -> Self {
        Self {
            market,
            window: ReportWindow::trailing_month(Utc::now().date_naive()),
            system: None,
            items: Vec::new(),
            categories: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Reload all three commission reports concurrently.
    ///
    /// A failure anywhere keeps the previous reports on screen and
    /// surfaces the error.
    pub async fn refresh(&mut self) {
        self.loading = true;
        let window = self.window;
        let result = tokio::try_join!(
            self.market.get_system_commission(window),
            self.market.get_item_commission(window),
            self.market.get_category_commission(window),
        );
        match result {
            Ok((system, items, categories)) => {
                self.system = Some(system);
                self.items = items;
                self.categories = categories;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    /// Use a different reporting window and reload.
    pub async fn set_window(&mut self, window: ReportWindow) {
        self.window = window;
        self.refresh().await;
    }

    /// Current reporting window.
    #[must_use]
    pub const fn window(&self) -> ReportWindow {
        self.window
    }

    /// The marketplace-wide report, once loaded.
    #[must_use]
    pub const fn system(&self) -> Option<&SystemCommission> {
        self.system.as_ref()
    }

    /// Per-item commission rows.
    #[must_use]
    pub fn items(&self) -> &[ItemCommission] {
        &self.items
    }

    /// Per-category commission rows.
    #[must_use]
    pub fn categories(&self) -> &[CategoryCommission] {
        &self.categories
    }

    /// Whether a reload is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last refresh error, cleared by the next successful refresh.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
