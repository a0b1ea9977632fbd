//! Time types for calendar events.
//!
//! This module provides [`EventTime`] for representing a parsed event
//! start/end marker (either a specific instant or an all-day date), and
//! [`TimeWindow`] for the lookahead range used when selecting events.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::raw_event::RawEventTime;

/// A parsed event start or end marker.
///
/// - **DateTime**: A specific point in time (with timezone, stored as UTC)
/// - **AllDay**: A date without a specific time (all-day events)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventTime {
    /// A specific datetime, stored in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day event date (no specific time).
    AllDay(NaiveDate),
}

impl EventTime {
    /// Parses a raw marker.
    ///
    /// `dateTime` must be RFC 3339 and is converted to UTC; `date` must be
    /// `YYYY-MM-DD`. Returns `None` when the marker is empty or unparseable.
    pub fn parse(raw: &RawEventTime) -> Option<Self> {
        if let Some(ref dt) = raw.date_time {
            return DateTime::parse_from_rfc3339(dt.trim())
                .map(|parsed| Self::DateTime(parsed.with_timezone(&Utc)))
                .ok();
        }
        raw.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .map(Self::AllDay)
    }

    /// Converts to a UTC datetime for comparison purposes.
    ///
    /// For all-day events, returns midnight UTC on that date.
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::AllDay(date) => date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

/// A lookahead window for selecting calendar events.
///
/// Represents a half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a time window starting at `now` and extending `duration`.
    ///
    /// A negative duration yields an empty window at `now`; a duration past
    /// the representable range ends the window at the latest instant.
    pub fn from_now(now: DateTime<Utc>, duration: Duration) -> Self {
        let end = now
            .checked_add_signed(duration.max(Duration::zero()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start: now, end }
    }

    /// Returns true if the interval `[start, end]` of an event overlaps this window.
    ///
    /// Mirrors the calendar API's `timeMin`/`timeMax` semantics: an event is
    /// selected if it ends after the window start and starts before the window end.
    pub fn overlaps(&self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> bool {
        let ends_after_start = end.is_none_or(|end| end > self.start);
        ends_after_start && start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, h, min, 0).unwrap()
    }

    mod event_time {
        use super::*;

        #[test]
        fn parses_rfc3339_with_offset_into_utc() {
            let parsed = EventTime::parse(&RawEventTime::instant("2025-02-05T10:00:00-05:00"));
            assert_eq!(parsed, Some(EventTime::DateTime(utc(15, 0))));
        }

        #[test]
        fn parses_date() {
            let parsed = EventTime::parse(&RawEventTime::date("2025-02-05")).unwrap();
            assert!(matches!(parsed, EventTime::AllDay(_)));
            assert_eq!(parsed.to_utc_datetime(), utc(0, 0));
        }

        #[test]
        fn malformed_instant_is_none() {
            assert_eq!(EventTime::parse(&RawEventTime::instant("tomorrow-ish")), None);
        }

        #[test]
        fn naive_instant_without_offset_is_none() {
            assert_eq!(
                EventTime::parse(&RawEventTime::instant("2025-02-05T10:00:00")),
                None
            );
        }

        #[test]
        fn malformed_date_is_none() {
            assert_eq!(EventTime::parse(&RawEventTime::date("05/02/2025")), None);
        }

        #[test]
        fn empty_marker_is_none() {
            assert_eq!(EventTime::parse(&RawEventTime::default()), None);
        }
    }

    mod time_window {
        use super::*;

        #[test]
        fn from_now() {
            let window = TimeWindow::from_now(utc(10, 0), Duration::hours(9));
            assert_eq!(window.start, utc(10, 0));
            assert_eq!(window.end, utc(19, 0));
        }

        #[test]
        fn negative_duration_is_empty() {
            let window = TimeWindow::from_now(utc(10, 0), Duration::hours(-1));
            assert_eq!(window.start, window.end);
        }

        #[test]
        fn huge_duration_saturates() {
            let window = TimeWindow::from_now(utc(10, 0), Duration::hours(i64::from(u32::MAX)));
            assert_eq!(window.start, utc(10, 0));
            assert_eq!(window.end, DateTime::<Utc>::MAX_UTC);
            assert!(window.overlaps(utc(11, 0), None));
        }

        #[test]
        fn overlap_rules() {
            let window = TimeWindow::from_now(utc(10, 0), Duration::hours(2));

            // In progress at window start
            assert!(window.overlaps(utc(9, 30), Some(utc(10, 30))));
            // Fully inside
            assert!(window.overlaps(utc(11, 0), Some(utc(11, 30))));
            // Ended exactly at window start
            assert!(!window.overlaps(utc(9, 0), Some(utc(10, 0))));
            // Starts at window end
            assert!(!window.overlaps(utc(12, 0), Some(utc(13, 0))));
            // No end marker
            assert!(window.overlaps(utc(11, 0), None));
        }
    }
}
