//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use nextcall_core::TracingOutputFormat;

/// nextcall - Join the meeting you should be in right now
#[derive(Debug, Parser)]
#[command(name = "nextcall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "NEXTCALL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Format of the diagnostics written to stderr
    #[arg(long, value_enum, env = "NEXTCALL_LOG_FORMAT", default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// Calendar events as JSON (an events.list response or an array); `-` for stdin
    #[arg(long, short, env = "NEXTCALL_EVENTS", default_value = "-", global = true)]
    pub events: PathBuf,

    /// Override the time used for "now" (RFC 3339, e.g. 2025-02-05T09:59:00Z)
    #[arg(long, short, value_parser = parse_now, global = true)]
    pub now: Option<DateTime<Utc>>,

    /// Format for the output
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Stdout, global = true)]
    pub format: OutputFormat,

    /// Minutes before start during which a meeting counts as about to start
    #[arg(long, global = true)]
    pub joinable_window: Option<u32>,

    /// Domain identifying conferencing links (e.g. zoom.us)
    #[arg(long, global = true)]
    pub domain: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List upcoming meetings and the one to join
    List,

    /// Open the meeting to join in the conferencing client
    Join,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}

/// Output formats for the `list` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Stdout,
    /// Alfred workflow JSON utility object
    Alfred,
    /// Machine-readable JSON
    Json,
}

/// Formats for diagnostics on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line text
    #[default]
    Compact,
    /// Multi-line text
    Pretty,
    /// JSON lines, for log collectors
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => Self::Compact,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Json => Self::Json,
        }
    }
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            format!("given datetime ({value}) is not valid RFC 3339, expected YYYY-MM-DDTHH:MM:SSZ: {e}")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_list_with_overrides() {
        let cli = Cli::try_parse_from([
            "nextcall",
            "--now",
            "2025-02-05T10:00:00+01:00",
            "--format",
            "alfred",
            "--joinable-window",
            "5",
            "list",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::List));
        assert_eq!(cli.format, OutputFormat::Alfred);
        assert_eq!(cli.joinable_window, Some(5));
        assert_eq!(
            cli.now,
            Some(Utc.with_ymd_and_hms(2025, 2, 5, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["nextcall", "join", "--events", "events.json"]).unwrap();
        assert!(matches!(cli.command, Command::Join));
        assert_eq!(cli.events, PathBuf::from("events.json"));
        assert_eq!(cli.format, OutputFormat::Stdout);
    }

    #[test]
    fn log_format_selects_tracing_output() {
        let cli = Cli::try_parse_from(["nextcall", "list", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(
            TracingOutputFormat::from(cli.log_format),
            TracingOutputFormat::Json
        );

        let cli = Cli::try_parse_from(["nextcall", "list"]).unwrap();
        assert_eq!(
            TracingOutputFormat::from(cli.log_format),
            TracingOutputFormat::default()
        );
    }

    #[test]
    fn rejects_bad_now() {
        let err = Cli::try_parse_from(["nextcall", "--now", "yesterday", "list"]).unwrap_err();
        assert!(err.to_string().contains("not valid RFC 3339"));
    }

    #[test]
    fn requires_a_command() {
        assert!(Cli::try_parse_from(["nextcall"]).is_err());
    }
}
