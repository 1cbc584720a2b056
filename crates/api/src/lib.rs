//! # deal-query-api
//!
//! API data transfer objects and wire formats.
//! This crate depends only on `domain` and `shared`.

/// API v1 DTOs.
pub mod v1;

/// Returns the api crate version.
#[must_use]
pub const fn api_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
