//! Terracotta CLI - marketplace administration from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products awaiting review
//! tc-cli products list --admin --status pending
//!
//! # Approve a product
//! tc-cli products approve 123
//!
//! # Cancel an order (prompts unless --yes)
//! tc-cli orders cancel ORD001 --yes
//!
//! # Revenue for the last 90 days, one point per day
//! tc-cli analytics revenue --period daily
//!
//! # Watch the verification dashboard until Ctrl-C
//! tc-cli dashboard --watch
//! ```
//!
//! # Environment Variables
//!
//! - `MARKETPLACE_API_URL` - Base URL of the marketplace REST API (required)
//! - `MARKETPLACE_SESSION_COOKIE` - Pre-issued admin session cookie
//! - `RUST_LOG` - Tracing filter (defaults to info for our crates)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use terracotta_admin::config::AdminConfig;
use terracotta_admin::market::CatalogScope;
use terracotta_admin::market::types::{
    CustomerDraft, DateRange, Period, ReportWindow, SellerDraft,
};
use terracotta_admin::state::AppState;
use terracotta_core::{
    ApprovalStatus, CustomerId, Email, OrderId, ProductId, RequestId, SellerId, StoreId,
};

mod commands;

#[derive(Parser)]
#[command(name = "tc-cli")]
#[command(author, version, about = "Terracotta marketplace admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Moderate the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage seller accounts
    Sellers {
        #[command(subcommand)]
        action: SellerAction,
    },
    /// Manage customer accounts
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Review after-sale requests
    Requests {
        #[command(subcommand)]
        action: RequestAction,
    },
    /// Verify stores
    Stores {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Revenue analytics
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },
    /// Commission reports
    Reports {
        #[command(subcommand)]
        action: ReportAction,
    },
    /// Show the verification dashboard counters
    Dashboard {
        /// Keep polling on the configured interval until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Session profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

/// List filters shared by every listing command.
#[derive(Args)]
struct FilterArgs {
    /// Keep only records with this status
    #[arg(long)]
    status: Option<String>,

    /// Keep only records in this category (request type for requests)
    #[arg(long)]
    category: Option<String>,

    /// Case-insensitive substring search
    #[arg(long)]
    search: Option<String>,

    /// Start of an inclusive date window (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// End of an inclusive date window (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
}

impl FilterArgs {
    fn into_state(self) -> terracotta_admin::components::FilterState {
        let mut filters = terracotta_admin::components::FilterState::new();
        if let Some(status) = self.status {
            filters = filters.with_status(status);
        }
        if let Some(category) = self.category {
            filters = filters.with_category(category);
        }
        if let Some(search) = self.search {
            filters = filters.with_search(search);
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            filters = filters.with_date_range(DateRange {
                start_date: from,
                end_date: to,
            });
        }
        filters
    }
}

/// Reporting window shared by the analytics and report commands.
#[derive(Args)]
struct WindowArgs {
    /// Start of the reporting window (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// End of the reporting window (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
}

impl WindowArgs {
    fn into_range(self) -> Option<DateRange> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateRange {
                start_date: from,
                end_date: to,
            }),
            _ => None,
        }
    }

    fn into_window(self) -> ReportWindow {
        match (self.from, self.to) {
            (Some(from), Some(to)) => ReportWindow {
                from_date: from,
                to_date: to,
            },
            _ => ReportWindow::trailing_month(Utc::now().date_naive()),
        }
    }
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Use the admin catalog, which includes pending and rejected items
        #[arg(long)]
        admin: bool,

        /// Re-pull on the configured interval until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Approve a product listing
    Approve {
        /// Product ID
        id: i64,
    },
    /// Reject a product listing
    Reject {
        /// Product ID
        id: i64,
    },
    /// Delete a product listing
    Delete {
        /// Product ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SellerAction {
    /// List sellers
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show one seller in full
    Show {
        /// Seller ID
        id: String,
    },
    /// Update a seller's editable fields
    Update {
        /// Seller ID
        id: String,

        /// New business name
        #[arg(long)]
        business_name: Option<String>,

        /// New owner name
        #[arg(long)]
        owner_name: Option<String>,

        /// New contact email
        #[arg(long)]
        email: Option<Email>,

        /// New contact phone
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customers
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Update a customer's editable fields
    Update {
        /// Customer ID
        id: String,

        /// New full name
        #[arg(long)]
        name: Option<String>,

        /// New account email
        #[arg(long)]
        email: Option<Email>,

        /// New shipping address
        #[arg(long)]
        address: Option<String>,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Cancel an order on the customer's behalf
    Cancel {
        /// Order ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RequestAction {
    /// List after-sale requests
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Move a request to a new status
    SetStatus {
        /// Request ID
        id: String,

        /// New status (pending, approved, rejected, processing, completed, cancelled)
        status: String,

        /// Notes to record alongside the decision
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// List stores in the verification queue
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Approve a store's application
    Approve {
        /// Store ID
        id: String,
    },
    /// Reject a store's application
    Reject {
        /// Store ID
        id: String,

        /// Reason shown to the store owner
        #[arg(long)]
        reason: String,
    },
    /// List a store's verification documents
    Documents {
        /// Store ID
        id: String,
    },
    /// Show the seller background behind an application
    Seller {
        /// Store ID
        id: String,
    },
}

#[derive(Subcommand)]
enum AnalyticsAction {
    /// Show the revenue report and leaderboards
    Revenue {
        /// Granularity (daily, monthly, quarterly, yearly)
        #[arg(long)]
        period: Option<Period>,

        #[command(flatten)]
        window: WindowArgs,
    },
    /// Regenerate the public analytics snapshot
    GeneratePublic {
        /// Granularity (daily, monthly, quarterly, yearly)
        #[arg(long)]
        period: Option<Period>,

        #[command(flatten)]
        window: WindowArgs,
    },
}

#[derive(Subcommand)]
enum ReportAction {
    /// Commission reports
    Commission {
        #[command(subcommand)]
        kind: CommissionKind,
    },
}

#[derive(Subcommand)]
enum CommissionKind {
    /// Marketplace-wide totals
    System {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Per-item breakdown
    Item {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Per-category breakdown
    Category {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// All three reports in one pull
    All {
        #[command(flatten)]
        window: WindowArgs,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the signed-in profile
    Show,
    /// Deactivate the signed-in account
    Deactivate {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration first; Sentry init needs it
    let config = AdminConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "terracotta_admin=info,terracotta_cli=info,tc_cli=info".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let state = AppState::new(config).expect("Failed to initialize marketplace client");

    let result = run(cli, &state).await;
    commands::drain_toasts(&state);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        if e.is_retryable() {
            tracing::warn!("The failure looks transient; re-running the command may succeed");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, state: &AppState) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List {
                filters,
                admin,
                watch,
            } => {
                let scope = if admin {
                    CatalogScope::Admin
                } else {
                    CatalogScope::Public
                };
                commands::products::list(state, scope, filters.into_state(), watch).await?;
            }
            ProductAction::Approve { id } => {
                commands::products::set_approval(
                    state,
                    ProductId::new(id),
                    ApprovalStatus::Approved,
                )
                .await?;
            }
            ProductAction::Reject { id } => {
                commands::products::set_approval(
                    state,
                    ProductId::new(id),
                    ApprovalStatus::Rejected,
                )
                .await?;
            }
            ProductAction::Delete { id, yes } => {
                commands::products::delete(state, ProductId::new(id), yes).await?;
            }
        },
        Commands::Sellers { action } => match action {
            SellerAction::List { filters } => {
                commands::sellers::list(state, filters.into_state()).await?;
            }
            SellerAction::Show { id } => {
                commands::sellers::show(state, &SellerId::new(id)).await?;
            }
            SellerAction::Update {
                id,
                business_name,
                owner_name,
                email,
                phone,
            } => {
                let draft = SellerDraft {
                    business_name,
                    owner_name,
                    email,
                    phone,
                };
                commands::sellers::update(state, SellerId::new(id), draft).await?;
            }
        },
        Commands::Customers { action } => match action {
            CustomerAction::List { filters } => {
                commands::customers::list(state, filters.into_state()).await?;
            }
            CustomerAction::Update {
                id,
                name,
                email,
                address,
            } => {
                let draft = CustomerDraft {
                    name,
                    email,
                    address,
                };
                commands::customers::update(state, CustomerId::new(id), draft).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::List { filters } => {
                commands::orders::list(state, filters.into_state()).await?;
            }
            OrderAction::Cancel { id, yes } => {
                commands::orders::cancel(state, OrderId::new(id), yes).await?;
            }
        },
        Commands::Requests { action } => match action {
            RequestAction::List { filters } => {
                commands::requests::list(state, filters.into_state()).await?;
            }
            RequestAction::SetStatus { id, status, notes } => {
                commands::requests::set_status(state, RequestId::new(id), &status, notes).await?;
            }
        },
        Commands::Stores { action } => match action {
            StoreAction::List { filters } => {
                commands::stores::list(state, filters.into_state()).await?;
            }
            StoreAction::Approve { id } => {
                commands::stores::approve(state, StoreId::new(id)).await?;
            }
            StoreAction::Reject { id, reason } => {
                commands::stores::reject(state, StoreId::new(id), reason).await?;
            }
            StoreAction::Documents { id } => {
                commands::stores::documents(state, &StoreId::new(id)).await?;
            }
            StoreAction::Seller { id } => {
                commands::stores::seller(state, &StoreId::new(id)).await?;
            }
        },
        Commands::Analytics { action } => match action {
            AnalyticsAction::Revenue { period, window } => {
                commands::analytics::revenue(state, period, window.into_range()).await?;
            }
            AnalyticsAction::GeneratePublic { period, window } => {
                commands::analytics::generate_public(state, period, window.into_range()).await?;
            }
        },
        Commands::Reports { action } => match action {
            ReportAction::Commission { kind } => match kind {
                CommissionKind::System { window } => {
                    commands::reports::system(state, window.into_window()).await?;
                }
                CommissionKind::Item { window } => {
                    commands::reports::item(state, window.into_window()).await?;
                }
                CommissionKind::Category { window } => {
                    commands::reports::category(state, window.into_window()).await?;
                }
                CommissionKind::All { window } => {
                    commands::reports::all(state, window.into_window()).await?;
                }
            },
        },
        Commands::Dashboard { watch } => {
            commands::dashboard::show(state, watch).await?;
        }
        Commands::Profile { action } => match action {
            ProfileAction::Show => {
                commands::profile::show(state).await?;
            }
            ProfileAction::Deactivate { yes } => {
                commands::profile::deactivate(state, yes).await?;
            }
        },
    }
    Ok(())
}
