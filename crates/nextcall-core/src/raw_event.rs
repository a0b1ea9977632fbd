//! Raw event type handed to the engine by the calendar collaborator.
//!
//! [`RawEvent`] mirrors the shape of a Google Calendar API event so a dump of
//! `events.list` can be deserialized directly. Start and end markers are kept
//! as the strings the API returned; parsing happens during normalization so
//! that a malformed value degrades to "absent" instead of rejecting the event.

use serde::{Deserialize, Serialize};

/// Start or end marker of a raw event.
///
/// Exactly one of `date_time` (precise instant, RFC 3339) or `date`
/// (whole-day marker, `YYYY-MM-DD`) is normally set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    /// A precise instant, e.g. `2025-02-05T10:00:00-05:00`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// A whole-day date, e.g. `2025-02-05`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// IANA timezone the event was created in. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl RawEventTime {
    /// Creates a marker carrying a precise instant.
    pub fn instant(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            ..Default::default()
        }
    }

    /// Creates a whole-day marker.
    pub fn date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Default::default()
        }
    }

    /// Returns true if this marker names a precise instant rather than a day.
    pub fn is_instant(&self) -> bool {
        self.date_time.is_some()
    }
}

/// An entry point for joining a conference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntryPoint {
    /// The type of entry point (e.g. "video", "phone", "more").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point_type: Option<String>,
    /// The URI for this entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl RawEntryPoint {
    /// Creates a video entry point with the given URI.
    pub fn video(uri: impl Into<String>) -> Self {
        Self {
            entry_point_type: Some("video".to_string()),
            uri: Some(uri.into()),
        }
    }

    /// Creates a phone entry point with the given URI.
    pub fn phone(uri: impl Into<String>) -> Self {
        Self {
            entry_point_type: Some("phone".to_string()),
            uri: Some(uri.into()),
        }
    }
}

/// Structured conference data attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConferenceData {
    /// Candidate conferencing endpoints. May be absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_points: Option<Vec<RawEntryPoint>>,
}

impl RawConferenceData {
    /// Creates conference data from a list of entry points.
    pub fn new(entry_points: Vec<RawEntryPoint>) -> Self {
        Self {
            entry_points: Some(entry_points),
        }
    }

    /// Returns the entry points, treating an absent list as empty.
    pub fn entry_points(&self) -> &[RawEntryPoint] {
        self.entry_points.as_deref().unwrap_or_default()
    }
}

/// A calendar event as fetched by the calendar collaborator.
///
/// Read-only to the engine. Only the fields the engine inspects are modeled;
/// unknown keys in the source JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Unique identifier for the event within the calendar.
    pub id: String,

    /// The event title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Free-text location; may mix a physical address and a meeting link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// When the event starts.
    #[serde(default)]
    pub start: RawEventTime,

    /// When the event ends.
    #[serde(default)]
    pub end: Option<RawEventTime>,

    /// Structured conference data (video meeting info).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_data: Option<RawConferenceData>,
}

impl RawEvent {
    /// Creates a raw event with an id and start marker.
    pub fn new(id: impl Into<String>, start: RawEventTime) -> Self {
        Self {
            id: id.into(),
            start,
            ..Default::default()
        }
    }

    /// Returns the effective title, falling back to "(No title)" if empty.
    pub fn effective_title(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("(No title)")
    }

    /// Builder method to set the end marker.
    pub fn with_end(mut self, end: RawEventTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set conference data.
    pub fn with_conference_data(mut self, conference_data: RawConferenceData) -> Self {
        self.conference_data = Some(conference_data);
        self
    }
}
