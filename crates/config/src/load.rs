//! Config loading helpers (file + env).
//!
//! The loader owns the merge order and surfaces user-facing failures as
//! typed `ErrorEnvelope`s.

use crate::env::{QueryEnv, apply_env_overrides};
use crate::schema::{QueryConfig, ValidatedQueryConfig};
use deal_query_shared::{ErrorCode, ErrorEnvelope};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`QueryEnv`)
/// - config JSON (file content)
/// - defaults (`QueryConfig::default()`)
pub fn load_query_config_from_sources(
    config_json: Option<&str>,
    env: &QueryEnv,
) -> Result<ValidatedQueryConfig, ErrorEnvelope> {
    let config = match config_json {
        None => QueryConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };

    apply_env_overrides(config, env)
}

/// Load the config from an optional file path.
pub fn load_query_config_from_path(
    config_path: Option<&Path>,
    env: &QueryEnv,
) -> Result<ValidatedQueryConfig, ErrorEnvelope> {
    let config = match config_path {
        None => QueryConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            debug!(path = %path.display(), ?format, "loaded config file");
            parse_config_unvalidated(&config_text, format)?
        },
    };

    if !env.is_empty() {
        debug!(source = "env", "applying env overrides");
    }
    apply_env_overrides(config, env)
}

/// Load the config from std env and an optional file path.
pub fn load_query_config_std_env(
    config_path: Option<&Path>,
) -> Result<ValidatedQueryConfig, ErrorEnvelope> {
    let env = QueryEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_query_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &QueryConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &QueryConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn parse_config_unvalidated(input: &str, format: ConfigFormat) -> Result<QueryConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}
