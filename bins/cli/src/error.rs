//! CLI failures that abort a command before any output is rendered.

use std::fmt;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    Internal = 1,
    InvalidInput = 2,
    Io = 3,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Errors raised by the CLI shell itself (stdin, stdout, rendering).
///
/// Domain and config failures are rendered as command output instead.
#[derive(Debug)]
pub enum CliError {
    /// Input arrived but was unusable (e.g. empty stdin).
    InvalidInput(String),
    /// Reading stdin or writing stdout failed.
    Io(std::io::Error),
    /// A response could not be serialized.
    Serialization(serde_json::Error),
    /// The log subscriber could not be installed.
    Logging(String),
}

impl CliError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::InvalidInput,
            Self::Io(_) => ExitCode::Io,
            Self::Serialization(_) | Self::Logging(_) => ExitCode::Internal,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(formatter, "invalid input: {message}"),
            Self::Io(error) => write!(formatter, "io error: {error}"),
            Self::Serialization(error) => write!(formatter, "failed to render output: {error}"),
            Self::Logging(message) => write!(formatter, "failed to initialize logging: {message}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}
