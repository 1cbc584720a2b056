//! API v1 DTOs and helpers.

mod mappers;
mod schema;
mod types;

pub use mappers::{
    error_code_to_api_v1, error_envelope_to_api_v1_error, parameter_map_to_api_v1,
    result_to_api_v1_result, validation_issues_to_api_v1, validation_result_to_api_v1,
};
pub use schema::{api_v1_query_parameters_schema, api_v1_validate_response_schema};
pub use types::*;
