//! Terracotta Admin library.
//!
//! Data and control layer for the marketplace admin panel: the typed REST
//! client for the marketplace API plus the controllers the panel's views
//! bind to (entity listings, edit dialogs, confirmation dialogs, analytics
//! and commission views, polled verification stats).
//!
//! Rendering is out of scope here; `tc-cli` is the shell that drives these
//! controllers, and any future UI binds to the same surface.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod market;
pub mod state;
pub mod toast;
