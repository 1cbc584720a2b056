//! `dq params`: validate a request and render its parameter map.

use super::RequestInputArgs;
use crate::error::CliError;
use crate::format::OutputMode;
use crate::output::{CliOutput, format_error_output, render_json_ok};
use deal_query_api::v1::{ApiV1ParametersResponseDto, parameter_map_to_api_v1};
use deal_query_config::{ValidatedQueryConfig, build_parameter_map, validate_query_parameters};
use deal_query_domain::{ParameterMap, QueryParameters};
use tracing::{info, warn};

/// Run the params command.
pub fn run_params(
    mode: OutputMode,
    config: &ValidatedQueryConfig,
    input: &RequestInputArgs,
    skip_validation: bool,
) -> Result<CliOutput, CliError> {
    let request = match input.load()? {
        Ok(request) => request,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let parameters = if skip_validation {
        warn!("validation skipped");
        request.parameters
    } else {
        match validate_query_parameters(&request.parameters) {
            Ok(validated) => validated.into_inner(),
            Err(error) => return Ok(format_error_output(mode, &error)),
        }
    };

    render_parameters(mode, config, &parameters, &request.ignored_keys)
}

/// Convert `parameters` into a map and render it with the configured base URL.
pub(super) fn render_parameters(
    mode: OutputMode,
    config: &ValidatedQueryConfig,
    parameters: &QueryParameters,
    ignored_keys: &[String],
) -> Result<CliOutput, CliError> {
    let map = match build_parameter_map(parameters) {
        Ok(map) => map,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    info!(entries = map.len(), "built parameter map");

    let response = parameter_map_to_api_v1(map, config.base_url());
    let stdout = if mode.is_json() {
        render_json_ok(&response)?
    } else {
        format_parameters_text(&response, ignored_keys)
    };
    Ok(CliOutput::ok(stdout))
}

fn format_parameters_text(response: &ApiV1ParametersResponseDto, ignored_keys: &[String]) -> String {
    let mut out = String::from("status: ok\n");
    push_map(&mut out, &response.parameters);
    out.push_str("queryString: ");
    out.push_str(&response.query_string);
    out.push('\n');
    if let Some(url) = response.url.as_deref() {
        out.push_str("url: ");
        out.push_str(url);
        out.push('\n');
    }
    if !ignored_keys.is_empty() {
        out.push_str("ignored: ");
        out.push_str(&ignored_keys.join(", "));
        out.push('\n');
    }
    out
}

fn push_map(out: &mut String, map: &ParameterMap) {
    out.push_str("parameters:\n");
    for (key, value) in map.iter() {
        out.push_str("  ");
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
}
