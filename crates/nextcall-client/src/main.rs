//! nextcall CLI entry point.

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;

use nextcall_client::cli::{Cli, Command, ConfigAction};
use nextcall_client::commands;
use nextcall_client::config::ClientConfig;
use nextcall_client::error::ClientResult;
use nextcall_core::tracing::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = TracingConfig::new(cli.debug).with_format(cli.log_format.into());
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<()> {
    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    }
    .with_overrides(&cli);

    // The only clock read; everything downstream takes `now` explicitly.
    let now = cli.now.unwrap_or_else(Utc::now);

    match cli.command {
        Command::List => commands::list::run(&cli, &config, now),
        Command::Join => commands::join::run(&cli, &config, now),
        Command::Config { ref action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
