//! # deal-query-config
//!
//! Request binding, request validation, and CLI configuration loading.
//! This crate depends on `domain` and `shared` only.

/// Request binding from string pairs and query strings.
pub mod binder;
/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (file + env).
pub mod load;
/// Request parsing and validation.
pub mod requests;
/// Configuration schema types and helpers.
pub mod schema;

pub use binder::{BindOutcome, bind_query_parameters, bind_query_string};
pub use env::{
    ENV_BASE_URL, ENV_DEFAULT_PAGE, ENV_DEFAULT_SCENARIO, ENV_DEFAULT_UID, EnvParseError,
    QueryEnv, apply_env_overrides,
};
pub use load::{
    load_query_config_from_path, load_query_config_from_sources, load_query_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use requests::{
    RequestValidationError, ValidatedQueryParameters, build_parameter_map,
    check_query_parameters, parse_query_parameters_json, parse_validated_query_parameters_json,
    validate_query_parameters,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, DefaultsConfig, OutputConfig, QueryConfig,
    ValidatedQueryConfig, parse_query_config_json, parse_query_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
