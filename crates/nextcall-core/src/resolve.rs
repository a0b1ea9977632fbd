//! Choosing the one meeting to join.
//!
//! The policy only resolves when the answer is obvious: a single meeting
//! about to start, or failing that a single meeting in progress. Anything
//! else is reported as [`ResolutionOutcome::Ambiguous`] so the caller can
//! let the user pick instead of guessing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::meeting::NormalizedMeeting;
use crate::normalize::EventNormalizer;
use crate::raw_event::RawEvent;

/// The result of a resolution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "meeting", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Exactly one meeting should be joined.
    Resolved(NormalizedMeeting),
    /// Several meetings qualify; the caller must let the user choose.
    Ambiguous,
    /// There is nothing to join.
    NoCandidates,
}

impl ResolutionOutcome {
    /// Returns the tag launcher integrations use for this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolved(_) => "FoundNextMeeting",
            Self::Ambiguous => "MultipleOptions",
            Self::NoCandidates => "NoOptions",
        }
    }

    /// Returns the resolved meeting, if any.
    pub fn meeting(&self) -> Option<&NormalizedMeeting> {
        match self {
            Self::Resolved(meeting) => Some(meeting),
            Self::Ambiguous | Self::NoCandidates => None,
        }
    }
}

/// Restricts meetings to the ones that can be joined: timed and linked.
pub fn candidates(meetings: &[NormalizedMeeting]) -> Vec<NormalizedMeeting> {
    meetings
        .iter()
        .filter(|m| m.is_candidate())
        .cloned()
        .collect()
}

/// Picks the meeting to join among `meetings`.
///
/// `meetings` must already be restricted to candidates (see [`candidates`]).
/// A single imminently joinable meeting wins over in-progress ones, so that
/// someone still in a meeting is pointed at the one about to start.
pub fn resolve(meetings: &[NormalizedMeeting], now: DateTime<Utc>) -> ResolutionOutcome {
    debug!(candidates = meetings.len(), %now, "looking for the meeting to join");
    if meetings.is_empty() {
        return ResolutionOutcome::NoCandidates;
    }

    if let Some(meeting) = single(meetings, |m| m.is_imminently_joinable) {
        debug!(event = %meeting.id, "one meeting is about to start");
        return ResolutionOutcome::Resolved(meeting.clone());
    }

    if let Some(meeting) = single(meetings, |m| m.in_progress) {
        debug!(event = %meeting.id, "one meeting is in progress");
        return ResolutionOutcome::Resolved(meeting.clone());
    }

    ResolutionOutcome::Ambiguous
}

/// Returns the only meeting matching `pred`, or `None` for zero or several.
fn single<F>(meetings: &[NormalizedMeeting], pred: F) -> Option<&NormalizedMeeting>
where
    F: Fn(&NormalizedMeeting) -> bool,
{
    let mut matching = meetings.iter().filter(|m| pred(m));
    match (matching.next(), matching.next()) {
        (Some(meeting), None) => Some(meeting),
        _ => None,
    }
}

/// Everything a caller needs after one run: the full list and the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Every normalized event, in input order.
    pub meetings: Vec<NormalizedMeeting>,
    /// The decision over the joinable subset.
    pub outcome: ResolutionOutcome,
}

impl Resolution {
    /// Returns the meetings that were considered for joining.
    pub fn candidates(&self) -> Vec<NormalizedMeeting> {
        candidates(&self.meetings)
    }
}

/// Runs raw events through normalization, filtering and resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingEngine {
    normalizer: EventNormalizer,
}

impl MeetingEngine {
    /// Creates an engine from the given configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            normalizer: EventNormalizer::from_config(config),
        }
    }

    /// Resolves `events` against the reference time `now`.
    pub fn run(&self, events: &[RawEvent], now: DateTime<Utc>) -> Resolution {
        let meetings = self.normalizer.normalize_all(events, now);
        let outcome = resolve(&candidates(&meetings), now);
        debug!(
            events = events.len(),
            outcome = outcome.as_str(),
            "resolution finished"
        );
        Resolution { meetings, outcome }
    }
}
