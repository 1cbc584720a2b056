//! Ordered field table for `QueryParameters`.
//!
//! The table replaces runtime property discovery: [`QueryField::ALL`] lists
//! every field in declaration order, and each variant knows its property
//! name, parameter key, display label, and rule set.

use crate::date_format::DateFormatValidator;
use crate::rules::{FieldRule, RATING_REGEX};
use std::fmt;
use std::sync::LazyLock;

const TEXT_MIN_LENGTH: usize = 3;
const TEXT_MAX_LENGTH: usize = 60;
const STAY_MESSAGE: &str = "Stay must be a number between 1 and 100 days";
const RATING_RANGE_MESSAGE: &str = "Rating must be a number between 0.0 and 5.0";
const RATING_PATTERN_MESSAGE: &str = "Rating has only one decimal place";

/// Rule group a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    /// Must be present, length 3–60.
    Required,
    /// Optional free text, length 3–60.
    Descriptive,
    /// Optional `yyyy-MM-dd` date.
    Date,
    /// Optional integer number of days, 1–100.
    Stay,
    /// Optional rating, 0.0–5.0 with one decimal place.
    Rating,
    /// Caller-defined key/value slot; no rules.
    Custom,
}

/// Every field of `QueryParameters`, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryField {
    /// Search scenario (e.g. `deal-finder`).
    Scenario,
    /// Result page identifier.
    Page,
    /// Caller identifier.
    Uid,
    /// Product type filter.
    ProductType,
    /// Destination city filter.
    DestinationCity,
    /// Earliest trip start date.
    MinTripStartDate,
    /// Latest trip start date.
    MaxTripStartDate,
    /// Length of stay in days.
    LengthOfStay,
    /// Minimum star rating.
    MinStarRating,
    /// Maximum star rating.
    MaxStarRating,
    /// Minimum guest rating.
    MinGuestRating,
    /// Maximum guest rating.
    MaxGuestRating,
    /// Minimum total rating.
    MinTotalRate,
    /// Maximum total rating.
    MaxTotalRate,
    /// Name half of the custom parameter pair.
    CustomParameterName,
    /// Value half of the custom parameter pair.
    CustomParameterValue,
}

impl QueryField {
    /// All fields in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Scenario,
        Self::Page,
        Self::Uid,
        Self::ProductType,
        Self::DestinationCity,
        Self::MinTripStartDate,
        Self::MaxTripStartDate,
        Self::LengthOfStay,
        Self::MinStarRating,
        Self::MaxStarRating,
        Self::MinGuestRating,
        Self::MaxGuestRating,
        Self::MinTotalRate,
        Self::MaxTotalRate,
        Self::CustomParameterName,
        Self::CustomParameterValue,
    ];

    /// Declared property name (`MinStarRating`).
    #[must_use]
    pub const fn property_name(self) -> &'static str {
        match self {
            Self::Scenario => "Scenario",
            Self::Page => "Page",
            Self::Uid => "Uid",
            Self::ProductType => "ProductType",
            Self::DestinationCity => "DestinationCity",
            Self::MinTripStartDate => "MinTripStartDate",
            Self::MaxTripStartDate => "MaxTripStartDate",
            Self::LengthOfStay => "LengthOfStay",
            Self::MinStarRating => "MinStarRating",
            Self::MaxStarRating => "MaxStarRating",
            Self::MinGuestRating => "MinGuestRating",
            Self::MaxGuestRating => "MaxGuestRating",
            Self::MinTotalRate => "MinTotalRate",
            Self::MaxTotalRate => "MaxTotalRate",
            Self::CustomParameterName => "CustomParameterName",
            Self::CustomParameterValue => "CustomParameterValue",
        }
    }

    /// Parameter key (lower-camel property name, e.g. `minStarRating`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Page => "page",
            Self::Uid => "uid",
            Self::ProductType => "productType",
            Self::DestinationCity => "destinationCity",
            Self::MinTripStartDate => "minTripStartDate",
            Self::MaxTripStartDate => "maxTripStartDate",
            Self::LengthOfStay => "lengthOfStay",
            Self::MinStarRating => "minStarRating",
            Self::MaxStarRating => "maxStarRating",
            Self::MinGuestRating => "minGuestRating",
            Self::MaxGuestRating => "maxGuestRating",
            Self::MinTotalRate => "minTotalRate",
            Self::MaxTotalRate => "maxTotalRate",
            Self::CustomParameterName => "customParameterName",
            Self::CustomParameterValue => "customParameterValue",
        }
    }

    /// Human label used in validation messages and form binding.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ProductType => "Product Type",
            Self::DestinationCity => "Destination City",
            Self::MinTripStartDate => "Minimum Trip Start Date",
            Self::MaxTripStartDate => "Maximum Trip Start Date",
            Self::LengthOfStay => "Length Of Stay",
            Self::MinStarRating => "Minimum Star Rating",
            Self::MaxStarRating => "Max Star Rating",
            Self::MinGuestRating => "Min Guest Rating",
            Self::MaxGuestRating => "Max Guest Rating",
            Self::MinTotalRate => "Min Total Rating",
            Self::MaxTotalRate => "Max Total Rating",
            Self::Scenario
            | Self::Page
            | Self::Uid
            | Self::CustomParameterName
            | Self::CustomParameterValue => self.property_name(),
        }
    }

    /// Rule group of this field.
    #[must_use]
    pub const fn class(self) -> FieldClass {
        match self {
            Self::Scenario | Self::Page | Self::Uid => FieldClass::Required,
            Self::ProductType | Self::DestinationCity => FieldClass::Descriptive,
            Self::MinTripStartDate | Self::MaxTripStartDate => FieldClass::Date,
            Self::LengthOfStay => FieldClass::Stay,
            Self::MinStarRating
            | Self::MaxStarRating
            | Self::MinGuestRating
            | Self::MaxGuestRating
            | Self::MinTotalRate
            | Self::MaxTotalRate => FieldClass::Rating,
            Self::CustomParameterName | Self::CustomParameterValue => FieldClass::Custom,
        }
    }

    /// Returns true for the two halves of the custom parameter pair.
    #[must_use]
    pub const fn is_custom(self) -> bool {
        matches!(self.class(), FieldClass::Custom)
    }

    /// Rules declared on this field, in evaluation order.
    #[must_use]
    pub fn rules(self) -> &'static [FieldRule] {
        let table = &*RULE_TABLE;
        match self.class() {
            FieldClass::Required => &table.required,
            FieldClass::Descriptive => &table.descriptive,
            FieldClass::Date => &table.date,
            FieldClass::Stay => &table.stay,
            FieldClass::Rating => &table.rating,
            FieldClass::Custom => &table.custom,
        }
    }

    /// Resolve a request key against the key, property name, or display
    /// name, ignoring ASCII case.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|field| {
            name.eq_ignore_ascii_case(field.key())
                || name.eq_ignore_ascii_case(field.display_name())
        })
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

struct RuleTable {
    required: [FieldRule; 2],
    descriptive: [FieldRule; 1],
    date: [FieldRule; 1],
    stay: [FieldRule; 1],
    rating: [FieldRule; 2],
    custom: [FieldRule; 0],
}

static RULE_TABLE: LazyLock<RuleTable> = LazyLock::new(|| RuleTable {
    required: [
        FieldRule::Required,
        FieldRule::Length {
            min: TEXT_MIN_LENGTH,
            max: TEXT_MAX_LENGTH,
        },
    ],
    descriptive: [FieldRule::Length {
        min: TEXT_MIN_LENGTH,
        max: TEXT_MAX_LENGTH,
    }],
    date: [FieldRule::Date(DateFormatValidator::iso_date())],
    stay: [FieldRule::IntegerRange {
        min: 1,
        max: 100,
        message: STAY_MESSAGE,
    }],
    rating: [
        FieldRule::DecimalRange {
            min: 0.0,
            max: 5.0,
            message: RATING_RANGE_MESSAGE,
        },
        FieldRule::Pattern {
            regex: &RATING_REGEX,
            message: RATING_PATTERN_MESSAGE,
        },
    ],
    custom: [],
});
