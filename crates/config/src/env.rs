//! Environment variable parsing and env-to-config merging.
//!
//! Parsing is strict: a variable that is present but blank, or a URL that is
//! not absolute `http`/`https`, fails instead of being ignored.

use crate::schema::{QueryConfig, ValidatedQueryConfig};
use deal_query_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Env var: default `scenario` seed.
pub const ENV_DEFAULT_SCENARIO: &str = "DQ_DEFAULT_SCENARIO";
/// Env var: default `page` seed.
pub const ENV_DEFAULT_PAGE: &str = "DQ_DEFAULT_PAGE";
/// Env var: default `uid` seed.
pub const ENV_DEFAULT_UID: &str = "DQ_DEFAULT_UID";
/// Env var: output base URL.
pub const ENV_BASE_URL: &str = "DQ_BASE_URL";

const KNOWN_VARS: [&str; 4] = [
    ENV_DEFAULT_SCENARIO,
    ENV_DEFAULT_PAGE,
    ENV_DEFAULT_UID,
    ENV_BASE_URL,
];

/// Parsed env overrides; `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryEnv {
    /// `DQ_DEFAULT_SCENARIO`.
    pub default_scenario: Option<Box<str>>,
    /// `DQ_DEFAULT_PAGE`.
    pub default_page: Option<Box<str>>,
    /// `DQ_DEFAULT_UID`.
    pub default_uid: Option<Box<str>>,
    /// `DQ_BASE_URL`, normalized.
    pub base_url: Option<Box<str>>,
}

impl QueryEnv {
    /// Parse overrides from an explicit variable map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            default_scenario: parse_optional_trimmed_string(map, ENV_DEFAULT_SCENARIO)?,
            default_page: parse_optional_trimmed_string(map, ENV_DEFAULT_PAGE)?,
            default_uid: parse_optional_trimmed_string(map, ENV_DEFAULT_UID)?,
            base_url: parse_optional_url_string(map, ENV_BASE_URL)?,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in KNOWN_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.default_scenario.is_none()
            && self.default_page.is_none()
            && self.default_uid.is_none()
            && self.base_url.is_none()
    }
}

/// Env parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// An env var holds an invalid URL.
    InvalidUrl {
        /// Env var name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidUrl { .. } => ErrorCode::new("config", "invalid_env_url"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidUrl { var, .. } => {
                write!(formatter, "{var} must be an absolute http or https URL")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidUrl { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

/// Apply env overrides to a base config (env wins over file/default values),
/// then validate the result.
pub fn apply_env_overrides(
    base: QueryConfig,
    env: &QueryEnv,
) -> Result<ValidatedQueryConfig, ErrorEnvelope> {
    let mut config = base;
    set_string(&mut config.defaults.scenario, env.default_scenario.as_deref());
    set_string(&mut config.defaults.page, env.default_page.as_deref());
    set_string(&mut config.defaults.uid, env.default_uid.as_deref());
    if let Some(url) = env.base_url.as_deref() {
        config.output.base_url = Some(url.to_owned());
    }

    config.validate().map_err(Into::into)
}

fn set_string(target: &mut String, value: Option<&str>) {
    if let Some(value) = value {
        value.clone_into(target);
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_url_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    let parsed = Url::parse(trimmed).map_err(|_| EnvParseError::InvalidUrl {
        var,
        value: raw.clone(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(EnvParseError::InvalidUrl {
            var,
            value: raw.clone(),
        });
    }

    Ok(Some(parsed.to_string().into_boxed_str()))
}
