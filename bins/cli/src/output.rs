//! Rendering helpers shared by command handlers.

use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use deal_query_api::v1::{
    ApiV1ErrorDto, ApiV1ErrorKind, ApiV1Result, error_envelope_to_api_v1_error,
};
use deal_query_shared::{ErrorEnvelope, ErrorKind};
use serde::Serialize;
use std::io::{self, Write};
use tracing::warn;

/// Rendered command result.
#[derive(Debug)]
pub struct CliOutput {
    pub stdout: String,
    pub exit_code: ExitCode,
}

impl CliOutput {
    pub const fn ok(stdout: String) -> Self {
        Self {
            stdout,
            exit_code: ExitCode::Ok,
        }
    }
}

/// Pretty JSON with a trailing newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

/// Wrap `data` as `{"ok":true,"data":...}` pretty JSON.
pub fn render_json_ok<T: Serialize>(data: T) -> Result<String, CliError> {
    render_json(&ApiV1Result::ok(data))
}

/// Render an error envelope in the requested mode and pick its exit code.
pub fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> CliOutput {
    let exit_code = exit_code_for(error);
    warn!(code = %error.code, exit_code = exit_code.as_u8(), "command failed");

    let api_error = error_envelope_to_api_v1_error(error, None);
    let stdout = if mode.is_json() {
        render_json(&ApiV1Result::<()>::err(api_error)).unwrap_or_else(|_| {
            "{\"ok\":false,\"error\":{\"code\":\"ERR_CORE_INTERNAL\",\"message\":\"internal error\",\"kind\":\"INVARIANT\"}}\n".to_string()
        })
    } else {
        format_api_error_text(&api_error)
    };

    CliOutput { stdout, exit_code }
}

/// Map an envelope to a process exit code.
///
/// Config file read failures are I/O; other expected failures are invalid
/// input; everything else is internal.
pub fn exit_code_for(error: &ErrorEnvelope) -> ExitCode {
    let code = &error.code;
    let is_io = code.namespace() == "config" && code.code().starts_with("config_file_");
    match error.kind {
        _ if is_io => ExitCode::Io,
        ErrorKind::Expected => ExitCode::InvalidInput,
        ErrorKind::Invariant | ErrorKind::Unexpected => ExitCode::Internal,
    }
}

fn format_api_error_text(error: &ApiV1ErrorDto) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    out.push_str("code: ");
    out.push_str(&error.code);
    out.push('\n');
    out.push_str("message: ");
    out.push_str(&error.message);
    out.push('\n');
    out.push_str("kind: ");
    out.push_str(match error.kind {
        ApiV1ErrorKind::Expected => "EXPECTED",
        ApiV1ErrorKind::Invariant => "INVARIANT",
    });
    out.push('\n');

    if let Some(meta) = error.meta.as_ref()
        && !meta.is_empty()
    {
        out.push_str("meta:\n");
        for (key, value) in meta {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
    }

    out
}

/// Write a rendered result to stdout.
pub fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
