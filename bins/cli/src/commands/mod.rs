//! Command handlers.

mod config;
mod defaults;
mod params;
mod schema;
mod validate;

pub use config::{ConfigFileFormat, run_config_show};
pub use defaults::run_defaults;
pub use params::run_params;
pub use schema::run_schema;
pub use validate::run_validate;

use crate::error::CliError;
use clap::Args;
use deal_query_config::{bind_query_string, parse_query_parameters_json};
use deal_query_domain::QueryParameters;
use deal_query_shared::ErrorEnvelope;
use std::io::{self, Read};
use tracing::debug;

/// Request source flags shared by `validate` and `params`.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct RequestInputArgs {
    /// Request as a JSON object with camelCase keys (`-` reads stdin).
    #[arg(long)]
    pub input_json: Option<String>,
    /// Request as a URL query string (`-` reads stdin).
    #[arg(long)]
    pub query: Option<String>,
}

/// Parsed request plus the keys the binder skipped.
#[derive(Debug)]
pub struct RequestInput {
    pub parameters: QueryParameters,
    pub ignored_keys: Vec<String>,
}

impl RequestInputArgs {
    /// Read and parse the request.
    ///
    /// The outer error is a CLI failure (stdin); the inner one is a request
    /// parse failure to be rendered as command output.
    pub fn load(&self) -> Result<Result<RequestInput, ErrorEnvelope>, CliError> {
        if let Some(json) = self.input_json.as_deref() {
            let text = resolve_stdin(json)?;
            debug!(source = "json", "parsing request");
            return Ok(
                parse_query_parameters_json(&text).map(|parameters| RequestInput {
                    parameters,
                    ignored_keys: Vec::new(),
                }),
            );
        }

        let query = resolve_stdin(self.query.as_deref().unwrap_or_default())?;
        debug!(source = "query", "binding request");
        let outcome = bind_query_string(&query);
        Ok(Ok(RequestInput {
            parameters: outcome.parameters,
            ignored_keys: outcome.ignored_keys,
        }))
    }
}

fn resolve_stdin(value: &str) -> Result<String, CliError> {
    if value != "-" {
        return Ok(value.to_owned());
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    let trimmed = buf.trim();
    if trimmed.is_empty() {
        return Err(CliError::InvalidInput("stdin request is empty".to_string()));
    }
    Ok(trimmed.to_string())
}
