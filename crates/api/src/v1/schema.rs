//! JSON Schema exports for API v1 DTOs.

use crate::v1::{ApiV1QueryParametersRequestDto, ApiV1ValidateResponseDto};
use schemars::{Schema, schema_for};

/// JSON Schema for `ApiV1QueryParametersRequestDto`.
#[must_use]
pub fn api_v1_query_parameters_schema() -> Schema {
    schema_for!(ApiV1QueryParametersRequestDto)
}

/// JSON Schema for `ApiV1ValidateResponseDto`.
#[must_use]
pub fn api_v1_validate_response_schema() -> Schema {
    schema_for!(ApiV1ValidateResponseDto)
}
