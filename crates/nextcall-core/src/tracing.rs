//! Diagnostics setup for the `nextcall` binary.
//!
//! Everything is written to stderr: stdout carries the launcher payload and
//! must stay parseable. `RUST_LOG` takes precedence over the configured level.
//!
//! ```ignore
//! use nextcall_core::tracing::{init_tracing, TracingConfig, TracingOutputFormat};
//!
//! init_tracing(TracingConfig::new(true).with_format(TracingOutputFormat::Json))?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// A subscriber is already installed
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// The filter directive does not parse
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// One short line per event, no timestamp (default)
    #[default]
    Compact,
    /// Multi-line, human-oriented
    Pretty,
    /// One JSON object per line
    Json,
}

/// Log level and rendering for one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level applied to the `nextcall` crates when `RUST_LOG` is unset.
    pub level: Level,
    /// Rendering of log lines.
    pub format: TracingOutputFormat,
    /// Adds the emitting module, file and line to every line.
    pub verbose: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TracingConfig {
    /// Warnings only, or everything down to `debug` with source locations.
    #[must_use]
    pub fn new(debug: bool) -> Self {
        Self {
            level: if debug { Level::DEBUG } else { Level::WARN },
            format: TracingOutputFormat::Compact,
            verbose: debug,
        }
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.format = format;
        self
    }

    /// The filter used when `RUST_LOG` is not set.
    pub fn directive(&self) -> String {
        format!("nextcall={}", self.level.as_str().to_lowercase())
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let verbose = self.verbose;
        match self.format {
            TracingOutputFormat::Compact => fmt::layer()
                .compact()
                .without_time()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_file(verbose)
                .with_line_number(verbose)
                .boxed(),
            TracingOutputFormat::Pretty => fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_file(verbose)
                .with_line_number(verbose)
                .boxed(),
            TracingOutputFormat::Json => fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_file(verbose)
                .with_line_number(verbose)
                .boxed(),
        }
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if a subscriber is already installed or the filter does not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.directive())?,
    };

    let subscriber = tracing_subscriber::registry()
        .with(config.layer())
        .with(filter);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
