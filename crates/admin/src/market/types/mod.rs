//! Wire types for the marketplace REST API.
//!
//! Field names on the wire follow the backend's mixed conventions
//! (`sellerID`, `businessName`, `request_id`, `approval_status`); the Rust
//! structs stay snake_case and map with serde renames.

pub mod analytics;
pub mod commission;
pub mod customer;
pub mod order;
pub mod product;
pub mod profile;
pub mod request;
pub mod seller;
pub mod store;

// Re-export all types for convenience
pub use analytics::*;
pub use commission::*;
pub use customer::*;
pub use order::*;
pub use product::*;
pub use profile::*;
pub use request::*;
pub use seller::*;
pub use store::*;
