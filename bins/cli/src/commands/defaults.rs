//! `dq defaults`: the seeded default request.

use super::params::render_parameters;
use crate::error::CliError;
use crate::format::OutputMode;
use crate::output::CliOutput;
use deal_query_config::ValidatedQueryConfig;

/// Run the defaults command.
pub fn run_defaults(mode: OutputMode, config: &ValidatedQueryConfig) -> Result<CliOutput, CliError> {
    render_parameters(mode, config, &config.seed_parameters(), &[])
}
