//! Join command.

use chrono::{DateTime, Utc};

use nextcall_core::{NormalizedMeeting, Resolution, ResolutionOutcome};

use crate::actions;
use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Opens the meeting to join, if there is exactly one.
pub fn run(cli: &Cli, config: &ClientConfig, now: DateTime<Utc>) -> ClientResult<()> {
    let resolution = super::resolve_events(cli, config, now)?;
    let meeting = meeting_to_join(&resolution)?;
    println!(
        "Joining {} ({})",
        meeting.title,
        meeting.link.as_deref().unwrap_or_default()
    );
    actions::open_meeting(meeting)
}

/// Returns the resolved meeting, or an error describing why there is none.
pub fn meeting_to_join(resolution: &Resolution) -> ClientResult<&NormalizedMeeting> {
    match resolution.outcome {
        ResolutionOutcome::Resolved(ref meeting) => Ok(meeting),
        ResolutionOutcome::Ambiguous => {
            let titles: Vec<String> = resolution
                .candidates()
                .into_iter()
                .map(|m| m.title)
                .collect();
            Err(ClientError::NothingToJoin(format!(
                "several meetings qualify: {}",
                titles.join(", ")
            )))
        }
        ResolutionOutcome::NoCandidates => Err(ClientError::NothingToJoin(
            "none of the upcoming meetings has a conferencing link".into(),
        )),
    }
}
