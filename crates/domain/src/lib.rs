//! # deal-query-domain
//!
//! Query-parameter model for deal searches.
//!
//! - **Fields** - `QueryField`, the ordered field table
//! - **Rules** - `FieldRule`, `DateFormatValidator`
//! - **Model** - `QueryParameters` with validation and defaults
//! - **Output** - `ParameterMap`, the ordered key/value result
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use deal_query_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod date_format;
pub mod fields;
pub mod parameter_map;
pub mod query_parameters;
pub mod rules;

pub use date_format::{DateFormatError, DateFormatValidator, ISO_DATE_PATTERN};
pub use fields::{FieldClass, QueryField};
pub use parameter_map::{ParameterMap, ParameterMapError, lower_camel};
pub use query_parameters::{DEFAULT_PAGE, DEFAULT_SCENARIO, DEFAULT_UID, QueryParameters};
pub use rules::{FieldRule, RATING_PATTERN};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_crate_compiles() {
        let version = domain_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn domain_depends_on_shared() {
        assert_eq!(shared_crate_version(), domain_crate_version());
    }
}
