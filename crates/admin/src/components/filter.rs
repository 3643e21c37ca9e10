//! Shared list filtering.
//!
//! Every admin list screen narrows the same way: an exact status facet, an
//! exact category facet, an inclusive date range, and a free-text search.
//! Filtering is pure and runs entirely on already-fetched records; it never
//! triggers a request.

use chrono::NaiveDate;

use crate::market::types::DateRange;

/// A record that the shared filter bar can narrow.
pub trait Filterable {
    /// Stable identifier, stringified for display and search.
    fn record_id(&self) -> String;

    /// Status facet value, for entities that have one.
    fn status_label(&self) -> Option<&str> {
        None
    }

    /// Category facet value, for entities that have one.
    fn category_label(&self) -> Option<&str> {
        None
    }

    /// The date an active range filter checks against.
    fn filed_on(&self) -> Option<NaiveDate> {
        None
    }

    /// Values the free-text search scans, identifier included.
    fn search_fields(&self) -> Vec<String>;
}

/// Active filter selections for one list screen.
///
/// All dimensions combine conjunctively: a record must pass every active
/// filter. Blank or whitespace-only text counts as inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Exact status to keep (case-insensitive).
    pub status: Option<String>,
    /// Exact category to keep (case-insensitive).
    pub category: Option<String>,
    /// Substring to search for (case-insensitive).
    pub search: Option<String>,
    /// Inclusive date window to keep.
    pub date_range: Option<DateRange>,
}

impl FilterState {
    /// No filters active.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: None,
            category: None,
            search: None,
            date_range: None,
        }
    }

    /// Keep only records with this status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Keep only records in this category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Keep only records matching this search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Keep only records dated inside this window.
    #[must_use]
    pub const fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Whether no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        active(self.status.as_deref()).is_none()
            && active(self.category.as_deref()).is_none()
            && active(self.search.as_deref()).is_none()
            && self.date_range.is_none()
    }

    /// Whether `record` passes every active filter.
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        if let Some(wanted) = active(self.status.as_deref()) {
            match record.status_label() {
                Some(label) if label.eq_ignore_ascii_case(wanted) => {}
                _ => return false,
            }
        }

        if let Some(wanted) = active(self.category.as_deref()) {
            match record.category_label() {
                Some(label) if label.eq_ignore_ascii_case(wanted) => {}
                _ => return false,
            }
        }

        // A record without a date cannot prove it belongs to the window.
        if let Some(range) = &self.date_range {
            match record.filed_on() {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        if let Some(needle) = active(self.search.as_deref()) {
            let needle = needle.to_lowercase();
            if !record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        true
    }
}

/// Apply `filters` to `records`, preserving order.
pub fn filter_records<T: Filterable + Clone>(records: &[T], filters: &FilterState) -> Vec<T> {
    records
        .iter()
        .filter(|record| filters.matches(*record))
        .cloned()
        .collect()
}

/// Treats blank and whitespace-only selections as inactive.
fn active(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
