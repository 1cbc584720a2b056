//! Wire-shape tests for API v1 DTOs.

use deal_query_api::v1::{
    ApiV1Result, api_v1_query_parameters_schema, error_envelope_to_api_v1_error,
    parameter_map_to_api_v1, validation_result_to_api_v1,
};
use deal_query_domain::{QueryField, QueryParameters};
use deal_query_shared::{ErrorEnvelope, Validate};
use serde_json::json;
use std::error::Error;
use url::Url;

#[test]
fn validate_response_lists_every_issue() -> Result<(), Box<dyn Error>> {
    let parameters = QueryParameters::defaults()
        .with(QueryField::LengthOfStay, "0")
        .with(QueryField::MinTripStartDate, "2024-13-01");
    let response = validation_result_to_api_v1(&parameters.validate());
    let value = serde_json::to_value(ApiV1Result::ok(response))?;

    assert_eq!(value["ok"], json!(true));
    assert_eq!(value["data"]["valid"], json!(false));
    let issues = value["data"]["issues"]
        .as_array()
        .ok_or("issues should be an array")?;
    let fields: Vec<_> = issues
        .iter()
        .filter_map(|issue| issue["field"].as_str())
        .collect();
    assert_eq!(fields, ["minTripStartDate", "lengthOfStay"]);
    assert_eq!(
        issues.get(1).map(|issue| &issue["message"]),
        Some(&json!("Stay must be a number between 1 and 100 days"))
    );
    Ok(())
}

#[test]
fn parameters_response_keeps_map_order() -> Result<(), Box<dyn Error>> {
    let parameters = QueryParameters::defaults()
        .with(QueryField::DestinationCity, "New York")
        .with(QueryField::CustomParameterName, "SortOrder")
        .with(QueryField::CustomParameterValue, "asc");
    let map = parameters.to_parameter_map()?;
    let base = Url::parse("https://deals.example.com/offers")?;
    let text = serde_json::to_string(&parameter_map_to_api_v1(map, Some(&base)))?;

    assert_eq!(
        text,
        concat!(
            r#"{"parameters":{"scenario":"deal-finder","page":"foo","uid":"foo","#,
            r#""destinationCity":"New York","sortOrder":"asc"},"#,
            r#""queryString":"scenario=deal-finder&page=foo&uid=foo&destinationCity=New+York&sortOrder=asc","#,
            r#""url":"https://deals.example.com/offers?scenario=deal-finder&page=foo&uid=foo&destinationCity=New+York&sortOrder=asc"}"#
        )
    );
    Ok(())
}

#[test]
fn duplicate_key_error_maps_to_stable_code() -> Result<(), Box<dyn Error>> {
    let parameters = QueryParameters::defaults()
        .with(QueryField::CustomParameterName, "Page")
        .with(QueryField::CustomParameterValue, "2");
    let error = parameters
        .to_parameter_map()
        .err()
        .ok_or("expected duplicate key")?;
    let dto = error_envelope_to_api_v1_error(&ErrorEnvelope::from(error), None);
    let value = serde_json::to_value(ApiV1Result::<()>::err(dto))?;

    assert_eq!(
        value,
        json!({
            "ok": false,
            "error": {
                "code": "ERR_DOMAIN_DUPLICATE_PARAMETER_KEY",
                "message": "An item with the same key has already been added. Key: page",
                "kind": "EXPECTED",
                "meta": { "key": "page" }
            }
        })
    );
    Ok(())
}

#[test]
fn request_schema_rejects_unknown_properties() {
    let schema = api_v1_query_parameters_schema();
    assert_eq!(
        schema.get("additionalProperties"),
        Some(&serde_json::Value::Bool(false))
    );
    assert!(
        schema
            .get("properties")
            .and_then(serde_json::Value::as_object)
            .is_some_and(|properties| properties.len() == 16)
    );
}
