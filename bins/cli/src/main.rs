//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod output;

use clap::{Parser, Subcommand};
use commands::{
    ConfigFileFormat, RequestInputArgs, run_config_show, run_defaults, run_params, run_schema,
    run_validate,
};
use deal_query_config::{ValidatedQueryConfig, load_query_config_std_env};
use error::CliError;
use format::{LogFormat, OutputArgs, OutputMode, verbosity_directive};
use output::{CliOutput, format_error_output, write_output};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Env var holding a log filter directive (`EnvFilter` syntax).
const ENV_LOG: &str = "DQ_LOG";
const DEFAULT_LOG_DIRECTIVE: &str = "warn";

#[derive(Debug, Parser)]
#[command(
    name = "dq",
    version,
    about = "Build and validate deal-finder query parameters",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    /// Config file path (JSON/TOML, detected by extension).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the seeded default request as a parameter map.
    Defaults,
    /// Validate a request and list every failing rule.
    Validate {
        #[command(flatten)]
        input: RequestInputArgs,
    },
    /// Validate a request and print its parameter map and query string.
    Params {
        #[command(flatten)]
        input: RequestInputArgs,
        /// Build the map without running field rules.
        #[arg(long)]
        skip_validation: bool,
    },
    /// Print the JSON Schema of the request model.
    Schema {
        /// Print the validate response schema instead.
        #[arg(long)]
        response: bool,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Show the effective config after env overrides.
    Show {
        /// Serialization used in text output mode.
        #[arg(long, value_enum, default_value_t = ConfigFileFormat::Toml)]
        format: ConfigFileFormat,
    },
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_tracing(&cli.output) {
        return exit_with_error(&error);
    }
    let mode = OutputMode::from_args(&cli.output);

    match run(&cli, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: &Cli, mode: OutputMode) -> Result<CliOutput, CliError> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Defaults => with_config(mode, config_path, |config| run_defaults(mode, config)),
        Commands::Validate { input } => {
            with_config(mode, config_path, |_| run_validate(mode, input))
        },
        Commands::Params {
            input,
            skip_validation,
        } => with_config(mode, config_path, |config| {
            run_params(mode, config, input, *skip_validation)
        }),
        Commands::Schema { response } => run_schema(*response),
        Commands::Config { command } => match command {
            ConfigCommands::Show { format } => {
                with_config(mode, config_path, |config| run_config_show(mode, config, *format))
            },
        },
    }
}

fn with_config(
    mode: OutputMode,
    path: Option<&Path>,
    command: impl FnOnce(&ValidatedQueryConfig) -> Result<CliOutput, CliError>,
) -> Result<CliOutput, CliError> {
    match load_query_config_std_env(path) {
        Ok(config) => {
            debug!(base_url = ?config.base_url().map(url::Url::as_str), "config loaded");
            command(&config)
        },
        Err(error) => Ok(format_error_output(mode, &error)),
    }
}

/// Install the stderr log subscriber.
///
/// `--verbose` wins over `DQ_LOG`; with neither, only warnings are shown.
fn init_tracing(args: &OutputArgs) -> Result<(), CliError> {
    let filter = match verbosity_directive(args.verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_env(ENV_LOG)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
    };

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    let installed = match args.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|error| CliError::Logging(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;
    use crate::format::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn version_flag_is_supported() {
        let result = Cli::command().try_get_matches_from(["dq", "--version"]);
        let is_version = matches!(
            result,
            Err(error) if error.kind() == clap::error::ErrorKind::DisplayVersion
        );

        assert!(is_version, "expected clap to render version");
    }

    #[test]
    fn global_flags_parse_after_subcommand() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from([
            "dq",
            "params",
            "--query",
            "scenario=deal-finder",
            "--skip-validation",
            "--output",
            "json",
            "-vv",
            "--log-format",
            "json",
            "--config",
            "dq.toml",
        ])?;
        assert_eq!(cli.output.output, OutputFormat::Json);
        assert_eq!(cli.output.verbose, 2);
        assert_eq!(cli.output.log_format, LogFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("dq.toml")));
        match cli.command {
            Commands::Params {
                input,
                skip_validation,
            } => {
                assert!(skip_validation);
                assert_eq!(input.query.as_deref(), Some("scenario=deal-finder"));
                assert_eq!(input.input_json, None);
            },
            _ => return Err("expected params command".into()),
        }
        Ok(())
    }

    #[test]
    fn request_input_is_required_and_exclusive() {
        let missing = Cli::try_parse_from(["dq", "validate"]);
        assert!(missing.is_err());

        let both = Cli::try_parse_from(["dq", "validate", "--query", "a=b", "--input-json", "{}"]);
        assert!(both.is_err());
    }

    #[test]
    fn config_show_defaults_to_toml() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["dq", "config", "show"])?;
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Show {
                    format: ConfigFileFormat::Toml
                }
            }
        ));
        Ok(())
    }

    #[test]
    fn verbosity_maps_to_directives() {
        assert_eq!(verbosity_directive(0), None);
        assert_eq!(verbosity_directive(1), Some("info"));
        assert_eq!(verbosity_directive(2), Some("debug"));
        assert_eq!(verbosity_directive(9), Some("trace"));
    }

    #[test]
    fn exit_codes_for_errors() -> Result<(), Box<dyn std::error::Error>> {
        let io_error = CliError::Io(io::Error::other("io"));
        let serialization_error = match serde_json::from_str::<serde_json::Value>("not-json") {
            Ok(_) => return Err("expected serialization error".into()),
            Err(error) => CliError::Serialization(error),
        };

        assert_eq!(io_error.exit_code(), ExitCode::Io);
        assert_eq!(serialization_error.exit_code(), ExitCode::Internal);
        assert_eq!(
            CliError::InvalidInput("empty".to_string()).exit_code(),
            ExitCode::InvalidInput
        );
        Ok(())
    }

    #[test]
    fn missing_config_file_is_an_io_failure() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["dq", "--config", "definitely-missing-dq.toml", "defaults"])?;
        let output = run(&cli, OutputMode::text())?;
        assert_eq!(output.exit_code, ExitCode::Io);
        assert!(output.stdout.contains("ERR_CONFIG_CONFIG_FILE_NOT_FOUND"));
        Ok(())
    }

    #[test]
    fn validate_also_rejects_a_missing_config_file() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from([
            "dq",
            "--config",
            "definitely-missing-dq.toml",
            "validate",
            "--query",
            "scenario=deal-finder&page=foo&uid=foo",
        ])?;
        let output = run(&cli, OutputMode::text())?;
        assert_eq!(output.exit_code, ExitCode::Io);
        assert!(output.stdout.contains("ERR_CONFIG_CONFIG_FILE_NOT_FOUND"));
        Ok(())
    }

    #[test]
    fn schema_response_flag_parses() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["dq", "schema", "--response"])?;
        assert!(matches!(cli.command, Commands::Schema { response: true }));
        Ok(())
    }
}
