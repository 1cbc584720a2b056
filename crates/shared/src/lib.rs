//! # deal-query-shared
//!
//! Shared result types, error envelopes, and validation contracts for the
//! deal-query workspace.
//!
//! - Result and error envelope types
//! - Validation issue collection and the `Validate` trait
//! - `Validated<T>` proof wrapper
//!
//! This crate has no workspace dependencies.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod invariants;
pub mod result;
pub mod validation;

pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use invariants::Validated;
pub use result::Result;
pub use validation::{Validate, ValidationIssue, ValidationIssues};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
