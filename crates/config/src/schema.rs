//! CLI configuration schema, defaults, and validation.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Default seeds are checked with the same rules as the query fields they
//!   populate.

use deal_query_domain::{DEFAULT_PAGE, DEFAULT_SCENARIO, DEFAULT_UID, QueryField, QueryParameters};
use deal_query_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Strip credentials from a URL before it lands in an error message.
fn sanitize_url_for_error(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() || !parsed.username().is_empty() {
                if parsed.set_username("").is_err() {
                    return "[invalid url: invalid username]".to_string();
                }
                if parsed.set_password(None).is_err() {
                    return "[invalid url: invalid password]".to_string();
                }
            }
            parsed.to_string()
        },
        Err(error) => format!("[invalid url: {error}]"),
    }
}

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Top-level CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct QueryConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Seeds for the required query fields.
    pub defaults: DefaultsConfig,
    /// Output rendering settings.
    pub output: OutputConfig,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            defaults: DefaultsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl QueryConfig {
    /// Validate the config and parse the output base URL.
    pub fn validate(self) -> Result<ValidatedQueryConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }

        self.defaults.validate()?;
        let base_url = self.output.parse_base_url()?;
        Ok(ValidatedQueryConfig {
            raw: self,
            base_url,
        })
    }
}

/// Seeds applied on top of [`QueryParameters::defaults`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct DefaultsConfig {
    /// Default `scenario`.
    pub scenario: String,
    /// Default `page`.
    pub page: String,
    /// Default `uid`.
    pub uid: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            scenario: DEFAULT_SCENARIO.to_owned(),
            page: DEFAULT_PAGE.to_owned(),
            uid: DEFAULT_UID.to_owned(),
        }
    }
}

impl DefaultsConfig {
    fn seeds(&self) -> [(QueryField, &str); 3] {
        [
            (QueryField::Scenario, self.scenario.as_str()),
            (QueryField::Page, self.page.as_str()),
            (QueryField::Uid, self.uid.as_str()),
        ]
    }

    fn validate(&self) -> Result<(), ConfigSchemaError> {
        for (field, value) in self.seeds() {
            for rule in field.rules() {
                rule.check(field.display_name(), Some(value))
                    .map_err(|reason| ConfigSchemaError::InvalidField {
                        section: "defaults",
                        field: field.key(),
                        reason,
                    })?;
            }
        }
        Ok(())
    }
}

/// Output rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct OutputConfig {
    /// Base URL the parameter map is appended to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl OutputConfig {
    fn parse_base_url(&self) -> Result<Option<Url>, ConfigSchemaError> {
        let Some(raw) = self.base_url.as_deref() else {
            return Ok(None);
        };
        let invalid = || ConfigSchemaError::InvalidUrl {
            section: "output",
            field: "baseUrl",
            url: sanitize_url_for_error(raw),
        };
        let parsed = Url::parse(raw.trim()).map_err(|_| invalid())?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(invalid());
        }
        Ok(Some(parsed))
    }
}

/// Validated config wrapper carrying the parsed base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQueryConfig {
    raw: QueryConfig,
    base_url: Option<Url>,
}

impl ValidatedQueryConfig {
    /// Parsed `output.baseUrl`.
    #[must_use]
    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Default query with the configured seeds applied.
    #[must_use]
    pub fn seed_parameters(&self) -> QueryParameters {
        let mut parameters = QueryParameters::defaults();
        for (field, value) in self.raw.defaults.seeds() {
            parameters.set(field, Some(value.to_owned()));
        }
        parameters
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &QueryConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> QueryConfig {
        self.raw
    }
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A field value fails its rules.
    InvalidField {
        /// Schema section (e.g. `defaults`).
        section: &'static str,
        /// Field name in the config file.
        field: &'static str,
        /// Rule failure message.
        reason: String,
    },
    /// A URL entry is invalid.
    InvalidUrl {
        /// Schema section (e.g. `output`).
        section: &'static str,
        /// Field name in the config file (e.g. `baseUrl`).
        field: &'static str,
        /// Invalid URL value, credentials stripped.
        url: String,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::InvalidField { .. } => ErrorCode::new("config", "invalid_field"),
            Self::InvalidUrl { .. } => ErrorCode::new("config", "invalid_url"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported config version: {found} (supported: {supported})"
                )
            },
            Self::InvalidField {
                section,
                field,
                reason,
            } => write!(formatter, "invalid value for {section}.{field}: {reason}"),
            Self::InvalidUrl { section, field, .. } => {
                write!(formatter, "invalid URL for {section}.{field}")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::InvalidField {
                section,
                field,
                reason,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("reason", reason),
            ConfigSchemaError::InvalidUrl {
                section,
                field,
                url,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("url", url),
        }
    }
}

/// Parse a config from JSON and validate it.
pub fn parse_query_config_json(input: &str) -> Result<ValidatedQueryConfig, ErrorEnvelope> {
    let config: QueryConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;
    config.validate().map_err(Into::into)
}

/// Parse a config from TOML and validate it.
pub fn parse_query_config_toml(input: &str) -> Result<ValidatedQueryConfig, ErrorEnvelope> {
    let config: QueryConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;
    config.validate().map_err(Into::into)
}
