//! Request parsing and validation helpers.
//!
//! Requests are boundary inputs (CLI/API) and must be validated before being
//! converted into a parameter map. Field rules live on the domain model;
//! this module only parses, runs them, and maps failures into envelopes.

use deal_query_domain::{ParameterMap, QueryField, QueryParameters};
use deal_query_shared::{ErrorCode, ErrorEnvelope, Validate, Validated, ValidationIssues};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Validated query parameters proof.
pub type ValidatedQueryParameters = Validated<QueryParameters>;

/// Request-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestValidationError {
    /// One or more fields failed their rules.
    InvalidFields {
        /// Every failing (field, message) pair, in field order.
        issues: ValidationIssues,
    },
}

impl RequestValidationError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidFields { .. } => ErrorCode::new("request", "validation_failed"),
        }
    }

    /// Issues carried by this error.
    #[must_use]
    pub const fn issues(&self) -> &ValidationIssues {
        match self {
            Self::InvalidFields { issues } => issues,
        }
    }
}

impl fmt::Display for RequestValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFields { issues } => {
                write!(formatter, "invalid query parameters: {issues}")
            },
        }
    }
}

impl std::error::Error for RequestValidationError {}

impl From<RequestValidationError> for ErrorEnvelope {
    fn from(error: RequestValidationError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            RequestValidationError::InvalidFields { issues } => {
                let mut by_field: BTreeMap<String, Vec<&str>> = BTreeMap::new();
                for issue in &issues {
                    by_field
                        .entry(format!("issue.{}", issue.field))
                        .or_default()
                        .push(&issue.message);
                }
                by_field.into_iter().fold(
                    envelope.with_metadata("issueCount", issues.len().to_string()),
                    |envelope, (key, messages)| envelope.with_metadata(key, messages.join("; ")),
                )
            },
        }
    }
}

/// Run every field rule; collect all failures.
pub fn validate_query_parameters(
    parameters: &QueryParameters,
) -> Result<ValidatedQueryParameters, ErrorEnvelope> {
    check_query_parameters(parameters).map_err(ErrorEnvelope::from)?;
    Ok(Validated::new(parameters.clone()))
}

/// Typed variant of [`validate_query_parameters`].
pub fn check_query_parameters(parameters: &QueryParameters) -> Result<(), RequestValidationError> {
    parameters.validate().map_err(|issues| {
        debug!(issue_count = issues.len(), "query parameters failed validation");
        RequestValidationError::InvalidFields { issues }
    })
}

/// Parse query parameters from JSON without validating them.
///
/// Empty string values become absent fields, matching the query-string
/// binder.
pub fn parse_query_parameters_json(input: &str) -> Result<QueryParameters, ErrorEnvelope> {
    parse_request_json("queryParameters", input).map(drop_empty_values)
}

/// Parse and validate query parameters from JSON.
pub fn parse_validated_query_parameters_json(
    input: &str,
) -> Result<ValidatedQueryParameters, ErrorEnvelope> {
    let parameters = parse_query_parameters_json(input)?;
    validate_query_parameters(&parameters)
}

/// Convert query parameters into a parameter map, mapping duplicate keys
/// into an envelope.
pub fn build_parameter_map(parameters: &QueryParameters) -> Result<ParameterMap, ErrorEnvelope> {
    parameters.to_parameter_map().map_err(ErrorEnvelope::from)
}

fn drop_empty_values(mut parameters: QueryParameters) -> QueryParameters {
    for field in QueryField::ALL {
        if parameters.get(field).is_some_and(str::is_empty) {
            parameters.set(field, None);
        }
    }
    parameters
}

fn parse_request_json<T: DeserializeOwned>(
    kind: &'static str,
    input: &str,
) -> Result<T, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("request", "invalid_json"),
            format!("invalid {kind} request JSON: {error}"),
        )
        .with_metadata("request_kind", kind)
    })
}
