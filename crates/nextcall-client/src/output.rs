//! Output rendering for the `list` command.
//!
//! - **stdout**: one block per meeting plus the resolution outcome
//! - **alfred**: an Alfred "JSON Utility" object whose `arg` is a Script
//!   Filter item list and whose variables carry the resolution outcome
//! - **json**: the full resolution as machine-readable JSON

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use nextcall_core::{NormalizedMeeting, Resolution, ResolutionOutcome};

use crate::cli::OutputFormat;
use crate::config::DisplaySettings;
use crate::error::{ClientError, ClientResult};

/// Renders a resolution in the requested format.
pub fn render(
    format: OutputFormat,
    resolution: &Resolution,
    display: &DisplaySettings,
) -> ClientResult<String> {
    match format {
        OutputFormat::Stdout => Ok(format_stdout(resolution)),
        OutputFormat::Alfred => format_alfred(resolution, display),
        OutputFormat::Json => format_json(resolution),
    }
}

fn format_start(start: Option<DateTime<Utc>>) -> String {
    start
        .map(|s| s.format("%Y-%m-%d %H:%M %Z").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Human-readable listing of every meeting and the outcome.
pub fn format_stdout(resolution: &Resolution) -> String {
    let mut out = String::new();
    if resolution.meetings.is_empty() {
        out.push_str("No upcoming events found.\n");
    }

    for meeting in &resolution.meetings {
        out.push_str(&format_meeting_block(meeting));
    }

    let summary = match resolution.outcome {
        ResolutionOutcome::Resolved(ref meeting) => format!(
            "Join: {} ({})",
            meeting.title,
            meeting.link.as_deref().unwrap_or_default()
        ),
        ResolutionOutcome::Ambiguous => {
            "Several meetings qualify, pick one from the list above.".to_string()
        }
        ResolutionOutcome::NoCandidates => {
            "None of the upcoming meetings can be joined.".to_string()
        }
    };
    out.push('\n');
    out.push_str(&summary);
    out.push('\n');
    out
}

fn format_meeting_block(meeting: &NormalizedMeeting) -> String {
    let lines = [
        format!("Event: {}", meeting.id),
        format!("  Summary: {}", meeting.title),
        format!("  Start  : {}", format_start(meeting.start)),
        format!(
            "  Markers: timed={} in_progress={} joinable={}",
            meeting.is_timed, meeting.in_progress, meeting.is_imminently_joinable
        ),
        format!("  Link   : {}", meeting.link.as_deref().unwrap_or("-")),
    ];
    let mut block = lines.join("\n");
    block.push('\n');
    block
}

/// Alfred Script Filter item icon.
#[derive(Debug, Serialize)]
struct ItemIcon {
    path: String,
}

/// Alfred Script Filter item.
#[derive(Debug, Serialize)]
struct Item {
    uid: String,
    title: String,
    subtitle: String,
    arg: Option<String>,
    variables: BTreeMap<&'static str, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<ItemIcon>,
}

impl Item {
    fn from_meeting(meeting: &NormalizedMeeting, display: &DisplaySettings) -> Self {
        let variables = BTreeMap::from([
            ("title", json!(meeting.title)),
            ("start", json!(meeting.start)),
        ]);
        Self {
            uid: meeting.id.clone(),
            title: meeting.title.clone(),
            subtitle: format!("Starting at {}", format_start(meeting.start)),
            arg: meeting.link.clone(),
            variables,
            icon: Some(ItemIcon {
                path: display.icon_for(&meeting.title).to_string(),
            }),
        }
    }
}

/// Alfred Script Filter output.
#[derive(Debug, Serialize)]
struct ScriptFilterOutput {
    items: Vec<Item>,
}

/// The `alfredworkflow` payload of a JSON Utility object.
#[derive(Debug, Serialize)]
struct AlfredWorkflow {
    arg: String,
    config: BTreeMap<String, String>,
    variables: BTreeMap<&'static str, Value>,
}

/// Alfred JSON Utility object.
#[derive(Debug, Serialize)]
struct JsonUtilityFormat {
    alfredworkflow: AlfredWorkflow,
}

/// Alfred JSON Utility output.
///
/// The candidate meetings become Script Filter items (serialized into
/// `arg`); the workflow variables tell the next step whether to prompt.
pub fn format_alfred(resolution: &Resolution, display: &DisplaySettings) -> ClientResult<String> {
    let items = resolution
        .candidates()
        .iter()
        .map(|meeting| Item::from_meeting(meeting, display))
        .collect();
    let arg = serde_json::to_string_pretty(&ScriptFilterOutput { items })
        .map_err(|e| ClientError::Output(e.to_string()))?;

    let mut variables = BTreeMap::from([
        (
            "need_to_prompt",
            json!(resolution.outcome.meeting().is_none()),
        ),
        ("next_meeting", json!(resolution.outcome.as_str())),
    ]);
    if let Some(meeting) = resolution.outcome.meeting() {
        variables.insert("zoom_link", json!(meeting.link));
        variables.insert("title", json!(meeting.title));
        variables.insert("start", json!(meeting.start));
    }

    let output = JsonUtilityFormat {
        alfredworkflow: AlfredWorkflow {
            arg,
            config: BTreeMap::new(),
            variables,
        },
    };
    serde_json::to_string_pretty(&output).map_err(|e| ClientError::Output(e.to_string()))
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    outcome: &'static str,
    meeting: Option<&'a NormalizedMeeting>,
    meetings: &'a [NormalizedMeeting],
}

/// Machine-readable JSON output.
pub fn format_json(resolution: &Resolution) -> ClientResult<String> {
    let output = JsonOutput {
        outcome: resolution.outcome.as_str(),
        meeting: resolution.outcome.meeting(),
        meetings: &resolution.meetings,
    };
    serde_json::to_string_pretty(&output).map_err(|e| ClientError::Output(e.to_string()))
}
