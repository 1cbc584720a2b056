//! `dq config show`: the effective configuration.

use crate::error::CliError;
use crate::format::OutputMode;
use crate::output::{CliOutput, format_error_output, render_json_ok};
use clap::ValueEnum;
use deal_query_config::{ValidatedQueryConfig, to_pretty_json, to_pretty_toml};

/// Serialization used by `config show` in text mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigFileFormat {
    Json,
    #[default]
    Toml,
}

/// Run the config show command.
pub fn run_config_show(
    mode: OutputMode,
    config: &ValidatedQueryConfig,
    format: ConfigFileFormat,
) -> Result<CliOutput, CliError> {
    if mode.is_json() {
        return Ok(CliOutput::ok(render_json_ok(config.as_ref())?));
    }

    let rendered = match format {
        ConfigFileFormat::Json => to_pretty_json(config.as_ref()),
        ConfigFileFormat::Toml => to_pretty_toml(config.as_ref()),
    };
    Ok(match rendered {
        Ok(stdout) => CliOutput::ok(stdout),
        Err(error) => format_error_output(mode, &error),
    })
}
