//! API v1 DTO mapping helpers.

use crate::v1::{
    ApiV1ErrorCode, ApiV1ErrorDto, ApiV1ErrorKind, ApiV1ErrorMeta, ApiV1ParametersResponseDto,
    ApiV1Result, ApiV1ValidateResponseDto, ApiV1ValidationIssueDto,
};
use deal_query_domain::ParameterMap;
use deal_query_shared::{ErrorCode, ErrorEnvelope, ErrorKind, ValidationIssues};
use url::Url;

const API_V1_REDACTED: &str = "[REDACTED]";

/// Convert a shared `ErrorCode` into an API v1 error code string.
#[must_use]
pub fn error_code_to_api_v1(code: &ErrorCode) -> ApiV1ErrorCode {
    let namespace = sanitize_code_segment(code.namespace());
    let detail = sanitize_code_segment(code.code());
    format!("ERR_{namespace}_{detail}")
}

/// Map an `ErrorEnvelope` into an API v1 error DTO.
#[must_use]
pub fn error_envelope_to_api_v1_error(
    envelope: &ErrorEnvelope,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1ErrorDto {
    let mut merged = ApiV1ErrorMeta::new();
    for (key, value) in &envelope.metadata {
        merged.insert(key.clone(), value.clone());
    }
    if let Some(extra) = extra_meta {
        merged.extend(extra);
    }
    let meta = if merged.is_empty() {
        None
    } else {
        Some(redact_api_v1_meta(merged))
    };

    ApiV1ErrorDto {
        code: error_code_to_api_v1(&envelope.code),
        message: envelope.message.clone(),
        kind: map_error_kind(envelope.kind),
        meta,
    }
}

/// Map a shared result into an API v1 result wrapper.
#[must_use]
pub fn result_to_api_v1_result<T>(
    result: Result<T, ErrorEnvelope>,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1Result<T> {
    match result {
        Ok(data) => ApiV1Result::ok(data),
        Err(error) => ApiV1Result::err(error_envelope_to_api_v1_error(&error, extra_meta)),
    }
}

/// Map collected validation issues into API v1 issue DTOs.
#[must_use]
pub fn validation_issues_to_api_v1(issues: &ValidationIssues) -> Vec<ApiV1ValidationIssueDto> {
    issues
        .iter()
        .map(|issue| ApiV1ValidationIssueDto {
            field: issue.field.to_string(),
            message: issue.message.to_string(),
        })
        .collect()
}

/// Map a validation outcome into the API v1 validate response.
#[must_use]
pub fn validation_result_to_api_v1(result: &Result<(), ValidationIssues>) -> ApiV1ValidateResponseDto {
    match result {
        Ok(()) => ApiV1ValidateResponseDto {
            valid: true,
            issues: Vec::new(),
        },
        Err(issues) => ApiV1ValidateResponseDto {
            valid: false,
            issues: validation_issues_to_api_v1(issues),
        },
    }
}

/// Build the API v1 parameter-map response, rendering a URL when a base URL
/// is supplied.
#[must_use]
pub fn parameter_map_to_api_v1(
    parameters: ParameterMap,
    base_url: Option<&Url>,
) -> ApiV1ParametersResponseDto {
    let query_string = parameters.to_query_string();
    let url = base_url.map(|base| parameters.to_url(base).to_string());
    ApiV1ParametersResponseDto {
        parameters,
        query_string,
        url,
    }
}

const fn map_error_kind(kind: ErrorKind) -> ApiV1ErrorKind {
    match kind {
        ErrorKind::Expected | ErrorKind::Unexpected => ApiV1ErrorKind::Expected,
        ErrorKind::Invariant => ApiV1ErrorKind::Invariant,
    }
}

fn sanitize_code_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn redact_api_v1_meta(meta: ApiV1ErrorMeta) -> ApiV1ErrorMeta {
    meta.into_iter()
        .map(|(key, value)| {
            if is_secret_key(&key) {
                (key, API_V1_REDACTED.to_string())
            } else {
                (key, value)
            }
        })
        .collect()
}

fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("api_key")
        || key.contains("apikey")
        || key.contains("token")
        || key.contains("password")
        || key.contains("secret")
        || key.contains("authorization")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deal_query_shared::ValidationIssue;
    use std::collections::BTreeMap;
    use std::error::Error;

    #[test]
    fn mapping_sanitizes_code_and_redacts_secrets() -> Result<(), Box<dyn Error>> {
        let envelope = ErrorEnvelope::expected(
            ErrorCode::new("domain", "duplicate_parameter_key"),
            "An item with the same key has already been added. Key: page",
        )
        .with_metadata("key", "page")
        .with_metadata("token", "secret-token");

        let dto = error_envelope_to_api_v1_error(&envelope, None);
        let meta = dto.meta.ok_or("meta should be present")?;
        assert_eq!(dto.code, "ERR_DOMAIN_DUPLICATE_PARAMETER_KEY");
        assert_eq!(dto.kind, ApiV1ErrorKind::Expected);
        assert_eq!(meta.get("key").map(String::as_str), Some("page"));
        assert_eq!(meta.get("token").map(String::as_str), Some("[REDACTED]"));
        Ok(())
    }

    #[test]
    fn unexpected_errors_map_to_expected_kind() {
        let envelope = ErrorEnvelope::unexpected(ErrorCode::internal(), "serializer failed");
        let dto = error_envelope_to_api_v1_error(&envelope, None);
        assert_eq!(dto.kind, ApiV1ErrorKind::Expected);
        assert_eq!(dto.meta, None);
    }

    #[test]
    fn result_mapping_preserves_ok_and_err() {
        let ok_result: Result<u32, ErrorEnvelope> = Ok(10);
        let mapped = result_to_api_v1_result(ok_result, None);
        assert!(mapped.is_ok());

        let mut extra = BTreeMap::new();
        extra.insert("requestId".to_string(), "abc".to_string());
        let err_result: Result<u32, ErrorEnvelope> = Err(ErrorEnvelope::expected(
            ErrorCode::invalid_input(),
            "bad input",
        ));
        let mapped = result_to_api_v1_result(err_result, Some(extra));
        assert!(matches!(
            mapped,
            ApiV1Result::Err { ok: false, ref error } if error.meta.as_ref().is_some_and(|meta| meta.contains_key("requestId"))
        ));
    }

    #[test]
    fn validation_outcome_maps_to_response() {
        let valid = validation_result_to_api_v1(&Ok(()));
        assert!(valid.valid);
        assert!(valid.issues.is_empty());

        let issues: ValidationIssues = [ValidationIssue::new("page", "The Page field is required.")]
            .into_iter()
            .collect();
        let invalid = validation_result_to_api_v1(&Err(issues));
        assert!(!invalid.valid);
        assert_eq!(invalid.issues.len(), 1);
        assert_eq!(invalid.issues.first().map(|issue| issue.field.as_str()), Some("page"));
    }

    #[test]
    fn parameter_response_renders_url_only_with_base() -> Result<(), Box<dyn Error>> {
        let mut map = ParameterMap::new();
        map.try_insert("scenario", "deal-finder")?;

        let without = parameter_map_to_api_v1(map.clone(), None);
        assert_eq!(without.query_string, "scenario=deal-finder");
        assert_eq!(without.url, None);

        let base = Url::parse("https://deals.example.com/offers")?;
        let with = parameter_map_to_api_v1(map, Some(&base));
        assert_eq!(
            with.url.as_deref(),
            Some("https://deals.example.com/offers?scenario=deal-finder")
        );
        Ok(())
    }
}
