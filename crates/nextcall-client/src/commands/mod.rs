//! Subcommand implementations.

pub mod config;
pub mod join;
pub mod list;

use chrono::{DateTime, Utc};
use tracing::debug;

use nextcall_core::{MeetingEngine, Resolution};

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::source;

/// Loads the events named on the command line and resolves them at `now`.
pub(crate) fn resolve_events(
    cli: &Cli,
    config: &ClientConfig,
    now: DateTime<Utc>,
) -> ClientResult<Resolution> {
    let events = source::read_events(&cli.events)?;
    let events = source::select_events(events, now, &config.engine);

    let resolution = MeetingEngine::new(&config.engine).run(&events, now);
    for meeting in &resolution.meetings {
        debug!(
            event = %meeting.id,
            title = %meeting.title,
            start = ?meeting.start,
            timed = meeting.is_timed,
            in_progress = meeting.in_progress,
            joinable = meeting.is_imminently_joinable,
            link = ?meeting.link,
            "normalized event"
        );
    }
    Ok(resolution)
}
