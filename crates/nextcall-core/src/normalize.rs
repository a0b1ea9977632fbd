//! RawEvent to NormalizedMeeting conversion.
//!
//! The normalization process:
//! 1. Parses the start/end markers (unparseable markers become absent)
//! 2. Classifies the meeting against the reference time
//! 3. Extracts the conferencing link and converts it to the client URI form
//!
//! Normalization never fails: a malformed event yields a meeting whose
//! temporal flags are all false.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::EngineConfig;
use crate::links::{LinkExtractor, LinkMatch};
use crate::meeting::NormalizedMeeting;
use crate::raw_event::{RawEvent, RawEventTime};
use crate::time::EventTime;

/// Converts raw events into [`NormalizedMeeting`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventNormalizer {
    joinable_window: Duration,
    extractor: LinkExtractor,
}

impl Default for EventNormalizer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl EventNormalizer {
    /// Creates a normalizer with the given window and link extractor.
    pub fn new(joinable_window: Duration, extractor: LinkExtractor) -> Self {
        Self {
            joinable_window,
            extractor,
        }
    }

    /// Creates a normalizer from the engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.joinable_window(),
            LinkExtractor::from_config(config),
        )
    }

    /// Normalizes one event against the reference time `now`.
    pub fn normalize(&self, raw: &RawEvent, now: DateTime<Utc>) -> NormalizedMeeting {
        let is_timed = raw.start.is_instant();
        let start = parse_marker(&raw.id, "start", &raw.start);
        let end = raw
            .end
            .as_ref()
            .and_then(|end| parse_marker(&raw.id, "end", end));

        let (in_progress, is_imminently_joinable) = match (is_timed, start) {
            (true, Some(start)) => {
                let in_progress = start <= now && end.is_some_and(|end| end >= now);
                let imminent = !in_progress && start > now && start - now < self.joinable_window;
                (in_progress, imminent)
            }
            _ => (false, false),
        };

        let link = self.link_for(raw);

        NormalizedMeeting {
            id: raw.id.clone(),
            title: raw.effective_title().to_string(),
            start,
            end,
            is_timed,
            in_progress,
            is_imminently_joinable,
            link,
        }
    }

    /// Normalizes a batch of events against the same reference time.
    pub fn normalize_all(&self, raw_events: &[RawEvent], now: DateTime<Utc>) -> Vec<NormalizedMeeting> {
        raw_events
            .iter()
            .map(|raw| self.normalize(raw, now))
            .collect()
    }

    fn link_for(&self, raw: &RawEvent) -> Option<String> {
        let found = self.extractor.extract(raw);
        match found {
            LinkMatch::NoMatchingEntryPoint => debug!(
                event = %raw.id,
                title = raw.effective_title(),
                marker = self.extractor.domain_marker(),
                "conference data found, but no matching link in it"
            ),
            LinkMatch::NoConferenceData => debug!(
                event = %raw.id,
                title = raw.effective_title(),
                "no conference data found"
            ),
            LinkMatch::Location(_) | LinkMatch::EntryPoint(_) => {}
        }
        found
            .into_uri()
            .map(|uri| self.extractor.to_client_uri(&uri))
    }
}

fn parse_marker(id: &str, field: &str, raw: &RawEventTime) -> Option<DateTime<Utc>> {
    let parsed = EventTime::parse(raw);
    if parsed.is_none() && (raw.date_time.is_some() || raw.date.is_some()) {
        debug!(event = %id, field, ?raw, "unparseable event time, treating as absent");
    }
    parsed.map(|time| time.to_utc_datetime())
}
