//! `dq validate`: report every failing field rule.

use super::RequestInputArgs;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use crate::output::{CliOutput, format_error_output, render_json_ok};
use deal_query_api::v1::{ApiV1ValidateResponseDto, validation_result_to_api_v1};
use deal_query_shared::Validate;
use tracing::info;

/// Run the validate command; exits with invalid input when any rule fails.
pub fn run_validate(mode: OutputMode, input: &RequestInputArgs) -> Result<CliOutput, CliError> {
    let request = match input.load()? {
        Ok(request) => request,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let response = validation_result_to_api_v1(&request.parameters.validate());
    info!(
        valid = response.valid,
        issue_count = response.issues.len(),
        "validated request"
    );

    let exit_code = if response.valid {
        ExitCode::Ok
    } else {
        ExitCode::InvalidInput
    };
    let stdout = if mode.is_json() {
        render_json_ok(&response)?
    } else {
        format_validate_text(&response)
    };
    Ok(CliOutput { stdout, exit_code })
}

fn format_validate_text(response: &ApiV1ValidateResponseDto) -> String {
    if response.valid {
        return "status: ok\nvalid: true\n".to_string();
    }
    let mut out = String::from("status: invalid\nvalid: false\nissues:\n");
    for issue in &response.issues {
        out.push_str("  ");
        out.push_str(&issue.field);
        out.push_str(": ");
        out.push_str(&issue.message);
        out.push('\n');
    }
    out
}
