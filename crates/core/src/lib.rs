//! Terracotta Core - Shared types library.
//!
//! This crate provides common types used across all Terracotta components:
//! - `admin` - Data and control layer for the marketplace admin panel
//! - `cli` - Command-line shell over the admin library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
