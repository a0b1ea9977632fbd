//! The normalized meeting record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event after normalization against a reference time.
///
/// Built by [`EventNormalizer`](crate::normalize::EventNormalizer); the
/// temporal flags are only meaningful for the `now` it was built with.
/// `in_progress` and `is_imminently_joinable` are never both true, and both
/// are false for events that are not timed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMeeting {
    /// Stable identifier, unique within a resolution run.
    pub id: String,
    /// The meeting title.
    pub title: String,
    /// Start instant. Whole-day events start at midnight UTC.
    pub start: Option<DateTime<Utc>>,
    /// End instant, absent when missing or unparseable.
    pub end: Option<DateTime<Utc>>,
    /// True when the event starts at a precise instant rather than on a day.
    pub is_timed: bool,
    /// True when the meeting interval contains `now`.
    pub in_progress: bool,
    /// True when the meeting starts shortly after `now`.
    pub is_imminently_joinable: bool,
    /// Invocation-ready conferencing URI.
    pub link: Option<String>,
}

impl NormalizedMeeting {
    /// Returns true if this meeting can be offered for joining at all.
    pub fn is_candidate(&self) -> bool {
        self.is_timed && self.link.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, h, min, 0).unwrap()
    }

    fn meeting() -> NormalizedMeeting {
        NormalizedMeeting {
            id: "evt-1".into(),
            title: "Sync".into(),
            start: Some(utc(10, 0)),
            end: Some(utc(10, 30)),
            is_timed: true,
            in_progress: false,
            is_imminently_joinable: false,
            link: Some("zoommtg://zoom.us/join?action=join&confno=1".into()),
        }
    }

    #[test]
    fn candidate_needs_timed_and_link() {
        assert!(meeting().is_candidate());
        assert!(
            !NormalizedMeeting {
                link: None,
                ..meeting()
            }
            .is_candidate()
        );
        assert!(
            !NormalizedMeeting {
                is_timed: false,
                ..meeting()
            }
            .is_candidate()
        );
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&meeting()).unwrap();
        let parsed: NormalizedMeeting = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meeting());
    }
}
