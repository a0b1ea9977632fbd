//! Engine configuration supplied by the caller.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Default lookahead for the event source, in hours.
pub const DEFAULT_HOURS_AHEAD: u32 = 9;
/// Default number of events kept by the event source.
pub const DEFAULT_MAX_EVENTS: usize = 5;
/// Default "about to start" threshold, in minutes.
///
/// Lets a meeting that ends at 10:00 be skipped at 9:59 in favour of the
/// one starting at 10:00.
pub const DEFAULT_JOINABLE_WINDOW_MINUTES: u32 = 3;
/// Default provider domain marker.
pub const DEFAULT_DOMAIN_MARKER: &str = "zoom.us";
/// Default URI scheme understood by the conferencing client.
pub const DEFAULT_CLIENT_SCHEME: &str = "zoommtg";

/// Configuration for the meeting resolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many hours ahead the event source looks. Not used by the engine.
    pub hours_ahead: u32,

    /// How many events the event source keeps. Not used by the engine.
    pub max_events: usize,

    /// A meeting starting within this many minutes is imminently joinable.
    pub joinable_window_minutes: u32,

    /// Substring identifying a conferencing link.
    pub domain_marker: String,

    /// Scheme of the invocation-ready URI handed to the conferencing client.
    pub client_scheme: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hours_ahead: DEFAULT_HOURS_AHEAD,
            max_events: DEFAULT_MAX_EVENTS,
            joinable_window_minutes: DEFAULT_JOINABLE_WINDOW_MINUTES,
            domain_marker: DEFAULT_DOMAIN_MARKER.to_string(),
            client_scheme: DEFAULT_CLIENT_SCHEME.to_string(),
        }
    }
}

impl EngineConfig {
    /// Returns the joinable window as a duration.
    pub fn joinable_window(&self) -> Duration {
        Duration::minutes(i64::from(self.joinable_window_minutes))
    }

    /// Returns the lookahead as a duration.
    pub fn lookahead(&self) -> Duration {
        Duration::hours(i64::from(self.hours_ahead))
    }

    /// Builder method to set the joinable window.
    #[must_use]
    pub fn with_joinable_window_minutes(mut self, minutes: u32) -> Self {
        self.joinable_window_minutes = minutes;
        self
    }

    /// Builder method to set the domain marker.
    #[must_use]
    pub fn with_domain_marker(mut self, marker: impl Into<String>) -> Self {
        self.domain_marker = marker.into();
        self
    }
}
