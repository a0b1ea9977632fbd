//! List command.

use chrono::{DateTime, Utc};

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::output;

/// Prints upcoming meetings and the one to join in the requested format.
pub fn run(cli: &Cli, config: &ClientConfig, now: DateTime<Utc>) -> ClientResult<()> {
    let resolution = super::resolve_events(cli, config, now)?;
    let rendered = output::render(cli.format, &resolution, &config.display)?;
    println!("{}", rendered.trim_end());
    Ok(())
}
