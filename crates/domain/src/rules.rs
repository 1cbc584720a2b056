//! Field-level validation rules.
//!
//! A field declares an ordered list of independent rules. Each rule sees the
//! raw field value and either passes or yields a message naming the field.

use crate::date_format::DateFormatValidator;
use regex::Regex;
use std::sync::LazyLock;

/// Lazily compiled regular expression shared by rule tables.
pub type CompiledPattern = LazyLock<Result<Regex, regex::Error>>;

/// Optional leading `&`, digits, and at most one fractional digit.
pub const RATING_PATTERN: &str = r"^&?[0-9]+(\.[0-9])?$";

/// Compiled [`RATING_PATTERN`].
pub static RATING_REGEX: CompiledPattern = LazyLock::new(|| Regex::new(RATING_PATTERN));

/// One independent check applied to a single field.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Value must be present and not blank.
    Required,
    /// When present, length in UTF-16 code units must lie in `[min, max]`.
    Length {
        /// Inclusive minimum length.
        min: usize,
        /// Inclusive maximum length.
        max: usize,
    },
    /// When present, value must parse exactly under a date pattern.
    Date(DateFormatValidator),
    /// When present and non-empty, value must be an integer in `[min, max]`.
    IntegerRange {
        /// Inclusive minimum.
        min: i64,
        /// Inclusive maximum.
        max: i64,
        /// Failure message.
        message: &'static str,
    },
    /// When present and non-empty, value must be a finite decimal in `[min, max]`.
    DecimalRange {
        /// Inclusive minimum.
        min: f64,
        /// Inclusive maximum.
        max: f64,
        /// Failure message.
        message: &'static str,
    },
    /// When present and non-empty, value must match the whole pattern.
    Pattern {
        /// Compiled expression (anchored).
        regex: &'static CompiledPattern,
        /// Failure message.
        message: &'static str,
    },
}

impl FieldRule {
    /// Check a raw value; `display_name` labels the field in default messages.
    pub fn check(&self, display_name: &str, value: Option<&str>) -> Result<(), String> {
        match self {
            Self::Required => match value {
                Some(value) if !value.trim().is_empty() => Ok(()),
                _ => Err(format!("The {display_name} field is required.")),
            },
            Self::Length { min, max } => {
                let Some(value) = value else {
                    return Ok(());
                };
                let length = value.encode_utf16().count();
                if (*min..=*max).contains(&length) {
                    Ok(())
                } else {
                    Err(format!(
                        "The field {display_name} must be a string with a minimum length of {min} and a maximum length of {max}."
                    ))
                }
            },
            Self::Date(validator) => validator.validate(value),
            Self::IntegerRange { min, max, message } => match non_empty(value) {
                None => Ok(()),
                Some(value) => match value.trim().parse::<i64>() {
                    Ok(number) if (*min..=*max).contains(&number) => Ok(()),
                    _ => Err((*message).to_owned()),
                },
            },
            Self::DecimalRange { min, max, message } => match non_empty(value) {
                None => Ok(()),
                Some(value) => match value.trim().parse::<f64>() {
                    Ok(number) if number.is_finite() && (*min..=*max).contains(&number) => Ok(()),
                    _ => Err((*message).to_owned()),
                },
            },
            Self::Pattern { regex, message } => {
                let Some(value) = non_empty(value) else {
                    return Ok(());
                };
                match &***regex {
                    Ok(regex) if regex.is_match(value) => Ok(()),
                    Ok(_) => Err((*message).to_owned()),
                    Err(error) => Err(format!("{display_name} pattern is invalid: {error}")),
                }
            },
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
