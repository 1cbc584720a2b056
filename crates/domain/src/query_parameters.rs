//! Search-query view-model: field storage, validation, and conversion to a
//! parameter map.

use crate::fields::QueryField;
use crate::parameter_map::{ParameterMap, ParameterMapError, lower_camel};
use deal_query_shared::{Validate, ValidationIssue, ValidationIssues};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default `scenario` seed.
pub const DEFAULT_SCENARIO: &str = "deal-finder";
/// Default `page` seed.
pub const DEFAULT_PAGE: &str = "foo";
/// Default `uid` seed.
pub const DEFAULT_UID: &str = "foo";

/// Query filters for a deal search. Every field is stored as a raw string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct QueryParameters {
    /// Search scenario. Required, 3–60 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Result page identifier. Required, 3–60 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Caller identifier. Required, 3–60 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Product type, 3–60 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Destination city, 3–60 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_city: Option<String>,
    /// Earliest trip start date (`yyyy-MM-dd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_trip_start_date: Option<String>,
    /// Latest trip start date (`yyyy-MM-dd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_trip_start_date: Option<String>,
    /// Length of stay in days, integer 1–100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_of_stay: Option<String>,
    /// Minimum star rating, 0.0–5.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_star_rating: Option<String>,
    /// Maximum star rating, 0.0–5.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_star_rating: Option<String>,
    /// Minimum guest rating, 0.0–5.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_guest_rating: Option<String>,
    /// Maximum guest rating, 0.0–5.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guest_rating: Option<String>,
    /// Minimum total rating, 0.0–5.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_total_rate: Option<String>,
    /// Maximum total rating, 0.0–5.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_total_rate: Option<String>,
    /// Key of the caller-defined extra parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_parameter_name: Option<String>,
    /// Value of the caller-defined extra parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_parameter_value: Option<String>,
}

impl QueryParameters {
    /// Baseline query: `scenario=deal-finder`, `page=foo`, `uid=foo`.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            scenario: Some(DEFAULT_SCENARIO.to_owned()),
            page: Some(DEFAULT_PAGE.to_owned()),
            uid: Some(DEFAULT_UID.to_owned()),
            ..Self::default()
        }
    }

    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: QueryField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: QueryField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Builder-style [`Self::set`].
    #[must_use]
    pub fn with(mut self, field: QueryField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Custom `(name, value)` pair, when both halves are non-empty.
    #[must_use]
    pub fn custom_pair(&self) -> Option<(&str, &str)> {
        let name = self.get(QueryField::CustomParameterName)?;
        let value = self.get(QueryField::CustomParameterValue)?;
        (!name.is_empty() && !value.is_empty()).then_some((name, value))
    }

    /// Flatten into an ordered parameter map. Performs no validation.
    ///
    /// Present fixed fields are emitted under their parameter keys in
    /// declaration order. The custom pair is spliced in afterwards, keyed by
    /// the lower-camel-cased custom name, at the slot `customParameterValue`
    /// occupies in that order.
    pub fn to_parameter_map(&self) -> Result<ParameterMap, ParameterMapError> {
        let mut map = ParameterMap::new();
        let mut custom_slot = 0;
        for field in QueryField::ALL {
            if field == QueryField::CustomParameterValue {
                custom_slot = map.len();
            }
            if field.is_custom() {
                continue;
            }
            if let Some(value) = self.get(field) {
                map.try_insert(field.key(), value)?;
            }
        }

        if let Some((name, value)) = self.custom_pair() {
            map.try_insert_at(custom_slot, lower_camel(name), value)?;
        }
        Ok(map)
    }

    const fn slot(&self, field: QueryField) -> &Option<String> {
        match field {
            QueryField::Scenario => &self.scenario,
            QueryField::Page => &self.page,
            QueryField::Uid => &self.uid,
            QueryField::ProductType => &self.product_type,
            QueryField::DestinationCity => &self.destination_city,
            QueryField::MinTripStartDate => &self.min_trip_start_date,
            QueryField::MaxTripStartDate => &self.max_trip_start_date,
            QueryField::LengthOfStay => &self.length_of_stay,
            QueryField::MinStarRating => &self.min_star_rating,
            QueryField::MaxStarRating => &self.max_star_rating,
            QueryField::MinGuestRating => &self.min_guest_rating,
            QueryField::MaxGuestRating => &self.max_guest_rating,
            QueryField::MinTotalRate => &self.min_total_rate,
            QueryField::MaxTotalRate => &self.max_total_rate,
            QueryField::CustomParameterName => &self.custom_parameter_name,
            QueryField::CustomParameterValue => &self.custom_parameter_value,
        }
    }

    const fn slot_mut(&mut self, field: QueryField) -> &mut Option<String> {
        match field {
            QueryField::Scenario => &mut self.scenario,
            QueryField::Page => &mut self.page,
            QueryField::Uid => &mut self.uid,
            QueryField::ProductType => &mut self.product_type,
            QueryField::DestinationCity => &mut self.destination_city,
            QueryField::MinTripStartDate => &mut self.min_trip_start_date,
            QueryField::MaxTripStartDate => &mut self.max_trip_start_date,
            QueryField::LengthOfStay => &mut self.length_of_stay,
            QueryField::MinStarRating => &mut self.min_star_rating,
            QueryField::MaxStarRating => &mut self.max_star_rating,
            QueryField::MinGuestRating => &mut self.min_guest_rating,
            QueryField::MaxGuestRating => &mut self.max_guest_rating,
            QueryField::MinTotalRate => &mut self.min_total_rate,
            QueryField::MaxTotalRate => &mut self.max_total_rate,
            QueryField::CustomParameterName => &mut self.custom_parameter_name,
            QueryField::CustomParameterValue => &mut self.custom_parameter_value,
        }
    }
}

impl Validate for QueryParameters {
    fn validate(&self) -> Result<(), ValidationIssues> {
        let mut issues = ValidationIssues::new();
        for field in QueryField::ALL {
            let value = self.get(field);
            for rule in field.rules() {
                if let Err(message) = rule.check(field.display_name(), value) {
                    issues.push(ValidationIssue::new(field.key(), message));
                }
            }
        }
        issues.into_result()
    }
}
