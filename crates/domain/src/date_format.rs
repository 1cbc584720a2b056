//! Exact date-format checks for string fields.
//!
//! Patterns use the `yyyy-MM-dd` token style. Supported tokens are `yyyy`,
//! `MM`, `dd`, `HH`, `mm` and `ss`; text inside single quotes and any other
//! character is matched literally.

use chrono::{NaiveDate, NaiveDateTime};
use deal_query_shared::{ErrorCode, ErrorEnvelope};
use std::fmt::Write as _;
use thiserror::Error;

/// Pattern used by the trip start date fields.
pub const ISO_DATE_PATTERN: &str = "yyyy-MM-dd";

const TOKENS: [(&str, &str); 6] = [
    ("yyyy", "%Y"),
    ("MM", "%m"),
    ("dd", "%d"),
    ("HH", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
];

/// Invalid date pattern supplied at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    /// The pattern is empty.
    #[error("date pattern must be non-empty")]
    EmptyPattern,
    /// The pattern lacks one of `yyyy`, `MM` or `dd`.
    #[error("date pattern `{pattern}` must contain yyyy, MM and dd")]
    MissingDateComponent {
        /// Pattern as supplied.
        pattern: String,
    },
    /// A quoted literal was never closed.
    #[error("date pattern `{pattern}` has an unterminated quoted literal")]
    UnterminatedLiteral {
        /// Pattern as supplied.
        pattern: String,
    },
}

impl From<DateFormatError> for ErrorEnvelope {
    fn from(error: DateFormatError) -> Self {
        let message = error.to_string();
        let envelope = Self::expected(ErrorCode::new("domain", "invalid_date_pattern"), message);
        match error {
            DateFormatError::EmptyPattern => envelope,
            DateFormatError::MissingDateComponent { pattern }
            | DateFormatError::UnterminatedLiteral { pattern } => {
                envelope.with_metadata("pattern", pattern)
            },
        }
    }
}

/// Checks that a string parses exactly under a fixed date pattern.
///
/// Parsing uses the proleptic Gregorian calendar with no locale data. Every
/// numeric token must be written at full width, so `2023-5-1` does not match
/// `yyyy-MM-dd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatValidator {
    pattern: Box<str>,
    strftime: Box<str>,
    has_time: bool,
}

impl DateFormatValidator {
    /// Validator for [`ISO_DATE_PATTERN`].
    #[must_use]
    pub fn iso_date() -> Self {
        Self {
            pattern: ISO_DATE_PATTERN.into(),
            strftime: "%Y-%m-%d".into(),
            has_time: false,
        }
    }

    /// Build a validator from a `yyyy-MM-dd` style pattern.
    pub fn parse(pattern: &str) -> Result<Self, DateFormatError> {
        if pattern.is_empty() {
            return Err(DateFormatError::EmptyPattern);
        }

        let mut strftime = String::with_capacity(pattern.len() * 2);
        let mut seen = [false; TOKENS.len()];
        let mut rest = pattern;
        'outer: while !rest.is_empty() {
            for (index, (token, directive)) in TOKENS.iter().enumerate() {
                if let Some(tail) = rest.strip_prefix(token) {
                    strftime.push_str(directive);
                    if let Some(flag) = seen.get_mut(index) {
                        *flag = true;
                    }
                    rest = tail;
                    continue 'outer;
                }
            }

            if let Some(quoted) = rest.strip_prefix('\'') {
                let Some(end) = quoted.find('\'') else {
                    return Err(DateFormatError::UnterminatedLiteral {
                        pattern: pattern.to_owned(),
                    });
                };
                let (literal, tail) = quoted.split_at(end);
                push_literal(&mut strftime, literal);
                rest = tail.get(1..).unwrap_or_default();
                continue;
            }

            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                push_literal(&mut strftime, ch.encode_utf8(&mut [0; 4]));
            }
            rest = chars.as_str();
        }

        if !seen.iter().take(3).all(|flag| *flag) {
            return Err(DateFormatError::MissingDateComponent {
                pattern: pattern.to_owned(),
            });
        }

        Ok(Self {
            pattern: pattern.into(),
            strftime: strftime.into_boxed_str(),
            has_time: seen.iter().skip(3).any(|flag| *flag),
        })
    }

    /// Pattern this validator checks against.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Validate a value; `None` is always accepted.
    ///
    /// The error carries the parser's message, or a fixed-width mismatch
    /// message when the value parsed but was not written at full width.
    pub fn validate(&self, value: Option<&str>) -> Result<(), String> {
        let Some(value) = value else {
            return Ok(());
        };

        let rendered = if self.has_time {
            NaiveDateTime::parse_from_str(value, &self.strftime)
                .map_err(|error| error.to_string())
                .and_then(|parsed| self.render(parsed.format(&self.strftime)))?
        } else {
            NaiveDate::parse_from_str(value, &self.strftime)
                .map_err(|error| error.to_string())
                .and_then(|parsed| self.render(parsed.format(&self.strftime)))?
        };

        if rendered == value {
            Ok(())
        } else {
            Err(format!(
                "String '{value}' was not recognized as a valid date in format {}.",
                self.pattern
            ))
        }
    }

    fn render(&self, formatted: impl std::fmt::Display) -> Result<String, String> {
        let mut rendered = String::new();
        write!(rendered, "{formatted}")
            .map_err(|_| format!("cannot render date with pattern {}", self.pattern))?;
        Ok(rendered)
    }
}

fn push_literal(strftime: &mut String, literal: &str) {
    for ch in literal.chars() {
        if ch == '%' {
            strftime.push_str("%%");
        } else {
            strftime.push(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_date_accepts_valid_dates() {
        let validator = DateFormatValidator::iso_date();
        assert!(validator.validate(Some("2023-05-01")).is_ok());
        assert!(validator.validate(Some("2024-02-29")).is_ok());
    }

    #[test]
    fn iso_date_rejects_out_of_range_and_wrong_layout() {
        let validator = DateFormatValidator::iso_date();
        assert!(validator.validate(Some("2023-13-40")).is_err());
        assert!(validator.validate(Some("05/01/2023")).is_err());
        assert!(validator.validate(Some("2023-02-29")).is_err());
        assert!(validator.validate(Some("")).is_err());
        assert!(validator.validate(Some("2023-05-01T00:00")).is_err());
    }

    #[test]
    fn absent_value_is_accepted() {
        assert!(DateFormatValidator::iso_date().validate(None).is_ok());
    }

    #[test]
    fn short_components_are_rejected() {
        let validator = DateFormatValidator::iso_date();
        let error = validator.validate(Some("2023-5-1")).err().unwrap_or_default();
        assert!(error.contains("yyyy-MM-dd"), "unexpected message: {error}");
    }

    #[test]
    fn parser_message_is_surfaced() {
        let validator = DateFormatValidator::iso_date();
        let error = validator.validate(Some("2023-13-40")).err().unwrap_or_default();
        assert!(!error.is_empty());
        assert!(!error.contains("yyyy-MM-dd"));
    }

    #[test]
    fn parse_matches_iso_date_builder() -> Result<(), DateFormatError> {
        let parsed = DateFormatValidator::parse(ISO_DATE_PATTERN)?;
        assert_eq!(parsed, DateFormatValidator::iso_date());
        Ok(())
    }

    #[test]
    fn custom_patterns_with_literals_and_time() -> Result<(), DateFormatError> {
        let validator = DateFormatValidator::parse("dd/MM/yyyy")?;
        assert!(validator.validate(Some("01/05/2023")).is_ok());
        assert!(validator.validate(Some("2023-05-01")).is_err());

        let validator = DateFormatValidator::parse("yyyy-MM-dd'T'HH:mm")?;
        assert!(validator.validate(Some("2023-05-01T13:45")).is_ok());
        assert!(validator.validate(Some("2023-05-01T25:45")).is_err());

        let validator = DateFormatValidator::parse("yyyy%MM%dd")?;
        assert!(validator.validate(Some("2023%05%01")).is_ok());
        Ok(())
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        assert_eq!(
            DateFormatValidator::parse(""),
            Err(DateFormatError::EmptyPattern)
        );
        assert!(matches!(
            DateFormatValidator::parse("HH:mm"),
            Err(DateFormatError::MissingDateComponent { .. })
        ));
        assert!(matches!(
            DateFormatValidator::parse("yyyy-MM-dd'T"),
            Err(DateFormatError::UnterminatedLiteral { .. })
        ));
    }

    #[test]
    fn pattern_errors_map_to_envelopes() {
        let envelope: ErrorEnvelope = DateFormatError::MissingDateComponent {
            pattern: "HH".to_string(),
        }
        .into();
        assert!(envelope.has_code("domain", "invalid_date_pattern"));
        assert_eq!(
            envelope.metadata.get("pattern").map(String::as_str),
            Some("HH")
        );
    }
}
