//! Reusable state machines behind the admin screens.
//!
//! Screens differ only in what they list; how they load, filter, refresh,
//! edit, and confirm is shared. Everything here is headless: no rendering,
//! no I/O beyond what the sources perform.

pub mod analytics;
pub mod dialog;
pub mod filter;
pub mod list;
pub mod refresh;
pub mod stats;

pub use analytics::{AnalyticsPanel, CommissionPanel};
pub use dialog::{ActionTarget, ConfirmDialog, DetailSource, DialogError, EditDialog};
pub use filter::{FilterState, Filterable, filter_records};
pub use list::{ListController, ListPhase, ListSource};
pub use refresh::{AutoRefresh, DEFAULT_REFRESH_INTERVAL};
pub use stats::StatsPanel;
