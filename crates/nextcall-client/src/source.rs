//! Event source: reads a calendar dump and applies the lookahead query.
//!
//! The dump is either a Google Calendar `events.list` response (an object
//! with an `items` array) or a bare array of events. Selection mirrors the
//! API query the dump would have come from: events overlapping
//! `[now, now + hours_ahead)`, ordered by start time, at most `max_events`.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use nextcall_core::{EngineConfig, EventTime, RawEvent, TimeWindow};

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventDump {
    List {
        #[serde(default)]
        items: Vec<RawEvent>,
    },
    Events(Vec<RawEvent>),
}

/// Reads events from `path`, or from stdin when `path` is `-`.
pub fn read_events(path: &Path) -> ClientResult<Vec<RawEvent>> {
    let mut content = String::new();
    if path == Path::new("-") {
        debug!("reading events from stdin");
        std::io::stdin().read_to_string(&mut content)?;
    } else {
        debug!(path = %path.display(), "reading events from file");
        content = std::fs::read_to_string(path).map_err(|source| ClientError::ReadEvents {
            path: path.to_path_buf(),
            source,
        })?;
    }
    parse_events(&content)
}

/// Parses an event dump.
pub fn parse_events(content: &str) -> ClientResult<Vec<RawEvent>> {
    let events = match serde_json::from_str::<EventDump>(content)? {
        EventDump::List { items } => items,
        EventDump::Events(events) => events,
    };
    Ok(events)
}

/// Keeps the events the calendar query would have returned.
///
/// Events are ordered by start before the `max_events` cut, so an unsorted
/// dump cannot push out the meeting about to start. Events whose start cannot
/// be parsed are kept, after the others and in input order, so the engine can
/// report them with degraded flags.
pub fn select_events(
    events: Vec<RawEvent>,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Vec<RawEvent> {
    let window = TimeWindow::from_now(now, config.lookahead());
    let total = events.len();
    let mut selected: Vec<RawEvent> = events
        .into_iter()
        .filter(|event| in_window(event, &window))
        .collect();
    selected.sort_by_key(|event| {
        let start = start_of(event);
        (start.is_none(), start)
    });
    selected.truncate(config.max_events);

    info!(
        total,
        selected = selected.len(),
        from = %window.start,
        to = %window.end,
        "selected upcoming events"
    );
    selected
}

fn start_of(event: &RawEvent) -> Option<DateTime<Utc>> {
    EventTime::parse(&event.start).map(|start| start.to_utc_datetime())
}

fn in_window(event: &RawEvent, window: &TimeWindow) -> bool {
    let Some(start) = start_of(event) else {
        return true;
    };
    let end = event
        .end
        .as_ref()
        .and_then(EventTime::parse)
        .map(|end| end.to_utc_datetime());
    window.overlaps(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use nextcall_core::{MeetingEngine, RawEventTime};
    use std::io::Write;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap()
    }

    fn event(id: &str, start_min: i64, end_min: i64) -> RawEvent {
        RawEvent::new(
            id,
            RawEventTime::instant((now() + Duration::minutes(start_min)).to_rfc3339()),
        )
        .with_end(RawEventTime::instant(
            (now() + Duration::minutes(end_min)).to_rfc3339(),
        ))
    }

    fn ids(events: &[RawEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    mod parsing {
        use super::*;

        #[test]
        fn parses_events_list_response() {
            let json = r#"{
                "kind": "calendar#events",
                "items": [
                    {"id": "a", "summary": "A", "start": {"dateTime": "2025-02-05T10:00:00Z"}, "end": {"dateTime": "2025-02-05T10:30:00Z"}},
                    {"id": "b", "summary": "B", "start": {"date": "2025-02-05"}, "end": {"date": "2025-02-06"}}
                ]
            }"#;
            let events = parse_events(json).unwrap();
            assert_eq!(ids(&events), ["a", "b"]);
            assert!(!events[1].start.is_instant());
        }

        #[test]
        fn parses_bare_array() {
            let json = r#"[{"id": "a", "start": {"dateTime": "2025-02-05T10:00:00Z"}}]"#;
            assert_eq!(ids(&parse_events(json).unwrap()), ["a"]);
        }

        #[test]
        fn response_without_items_is_empty() {
            assert!(parse_events(r#"{"kind": "calendar#events"}"#).unwrap().is_empty());
        }

        #[test]
        fn invalid_json_is_an_error() {
            let err = parse_events("not json").unwrap_err();
            assert!(matches!(err, ClientError::ParseEvents(_)));
        }

        #[test]
        fn reads_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, r#"{{"items": [{{"id": "x", "start": {{"date": "2025-02-05"}}}}]}}"#)
                .unwrap();
            assert_eq!(ids(&read_events(file.path()).unwrap()), ["x"]);
        }

        #[test]
        fn missing_file_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = read_events(&dir.path().join("events.json")).unwrap_err();
            assert!(matches!(err, ClientError::ReadEvents { .. }));
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn drops_finished_and_far_future_events() {
            let events = vec![
                event("finished", -60, -30),
                event("ongoing", -10, 20),
                event("later", 120, 150),
                event("tomorrow", 24 * 60, 24 * 60 + 30),
            ];
            let selected = select_events(events, now(), &EngineConfig::default());
            assert_eq!(ids(&selected), ["ongoing", "later"]);
        }

        #[test]
        fn keeps_at_most_max_events() {
            let events = (0..8).map(|i| event(&format!("e{i}"), i * 10, i * 10 + 5)).collect();
            let config = EngineConfig {
                max_events: 3,
                ..Default::default()
            };
            assert_eq!(ids(&select_events(events, now(), &config)), ["e0", "e1", "e2"]);
        }

        #[test]
        fn orders_by_start_before_the_cut() {
            let mut events: Vec<RawEvent> = (1..=5)
                .map(|i| {
                    event(&format!("l{i}"), i * 60, i * 60 + 30)
                        .with_location("https://zoom.us/j/1")
                })
                .collect();
            events.push(event("soon", 2, 30).with_location("https://zoom.us/j/2"));

            let config = EngineConfig::default();
            let selected = select_events(events, now(), &config);
            assert_eq!(ids(&selected), ["soon", "l1", "l2", "l3", "l4"]);

            let resolution = MeetingEngine::new(&config).run(&selected, now());
            assert_eq!(
                resolution.outcome.meeting().map(|m| m.id.as_str()),
                Some("soon")
            );
        }

        #[test]
        fn unparseable_events_sort_last_in_input_order() {
            let events = vec![
                RawEvent::new("broken-a", RawEventTime::instant("garbage")),
                event("later", 30, 60),
                RawEvent::new("broken-b", RawEventTime::instant("nope")),
                event("ongoing", -10, 20),
            ];
            let selected = select_events(events, now(), &EngineConfig::default());
            assert_eq!(ids(&selected), ["ongoing", "later", "broken-a", "broken-b"]);
        }

        #[test]
        fn keeps_unparseable_events() {
            let broken = RawEvent::new("broken", RawEventTime::instant("garbage"));
            let selected = select_events(vec![broken], now(), &EngineConfig::default());
            assert_eq!(ids(&selected), ["broken"]);
        }

        #[test]
        fn keeps_todays_all_day_event() {
            let holiday = RawEvent::new("holiday", RawEventTime::date("2025-02-05"))
                .with_end(RawEventTime::date("2025-02-06"));
            let selected = select_events(vec![holiday], now(), &EngineConfig::default());
            assert_eq!(ids(&selected), ["holiday"]);
        }
    }
}
