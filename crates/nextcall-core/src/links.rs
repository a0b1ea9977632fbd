//! Conferencing link extraction and client URI conversion.
//!
//! This module provides functionality to:
//! - Find a conferencing link in an event's free-text location
//! - Fall back to the event's structured conference entry points
//! - Unwrap Microsoft Outlook SafeLinks
//! - Convert a web join link into the URI the conferencing client launches
//!
//! # Example
//!
//! ```
//! use nextcall_core::links::LinkExtractor;
//! use nextcall_core::raw_event::{RawEvent, RawEventTime};
//!
//! let extractor = LinkExtractor::new("zoom.us", "zoommtg");
//! let event = RawEvent::new("evt", RawEventTime::instant("2025-02-05T10:00:00Z"))
//!     .with_location("123 Main St, https://zoom.us/j/111");
//! let link = extractor.extract(&event).into_uri().unwrap();
//! assert_eq!(link, "https://zoom.us/j/111");
//! assert_eq!(
//!     extractor.to_client_uri(&link),
//!     "zoommtg://zoom.us/join?action=join&confno=111"
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::config::EngineConfig;
use crate::raw_event::{RawConferenceData, RawEvent};

/// Regex for extracting URLs from text.
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'\)\]]+"#).expect("Invalid URL regex"));

/// Regex for detecting Microsoft Outlook SafeLinks.
///
/// SafeLinks wrap the original URL in a redirect through `safelinks.protection.outlook.com`.
/// The original URL is encoded in the `url` query parameter.
static SAFELINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^/]*safelinks\.protection\.outlook\.com/?\?[^?]*url=([^&]+)")
        .expect("Invalid SafeLink regex")
});

/// Where a conferencing link was found, or why none was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkMatch {
    /// Found in the free-text location field.
    Location(String),
    /// Found among the structured conference entry points.
    EntryPoint(String),
    /// Entry points exist but none carries the provider domain.
    NoMatchingEntryPoint,
    /// No location match and no (or an empty) entry point list.
    NoConferenceData,
}

impl LinkMatch {
    /// Returns the matched URI, if any.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Location(uri) | Self::EntryPoint(uri) => Some(uri),
            Self::NoMatchingEntryPoint | Self::NoConferenceData => None,
        }
    }

    /// Consumes the match and returns the URI, if any.
    pub fn into_uri(self) -> Option<String> {
        match self {
            Self::Location(uri) | Self::EntryPoint(uri) => Some(uri),
            Self::NoMatchingEntryPoint | Self::NoConferenceData => None,
        }
    }
}

/// Finds conferencing links in raw events.
///
/// A link is recognized by a provider domain marker (e.g. `zoom.us`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkExtractor {
    domain_marker: String,
    client_scheme: String,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl LinkExtractor {
    /// Creates an extractor for the given domain marker and client scheme.
    pub fn new(domain_marker: impl Into<String>, client_scheme: impl Into<String>) -> Self {
        Self {
            domain_marker: domain_marker.into(),
            client_scheme: client_scheme.into(),
        }
    }

    /// Creates an extractor from the engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.domain_marker, &config.client_scheme)
    }

    /// Returns the domain marker used for matching.
    pub fn domain_marker(&self) -> &str {
        &self.domain_marker
    }

    /// Finds the conferencing link of an event.
    ///
    /// The location field is inspected first. When it is a comma-separated
    /// list (an address followed by a link, say) the first segment carrying
    /// the domain marker wins. Otherwise the first entry point whose URI
    /// carries the marker is used.
    pub fn extract(&self, event: &RawEvent) -> LinkMatch {
        if let Some(uri) = event
            .location
            .as_deref()
            .and_then(|location| self.from_location(location))
        {
            return LinkMatch::Location(uri);
        }

        match event.conference_data {
            Some(ref conf) => self.from_conference_data(conf),
            None => LinkMatch::NoConferenceData,
        }
    }

    fn from_location(&self, location: &str) -> Option<String> {
        let marker = self.domain_marker.as_str();
        let segment = location
            .split(',')
            .map(str::trim)
            .find(|segment| segment.contains(marker))?;

        // "Zoom: https://..." style segments carry a label before the link
        let url = URL_REGEX
            .find_iter(segment)
            .map(|m| m.as_str())
            .find(|url| url.contains(marker))
            .unwrap_or(segment);

        Some(unwrap_safelink(url))
    }

    fn from_conference_data(&self, conf: &RawConferenceData) -> LinkMatch {
        let entry_points = conf.entry_points();
        if entry_points.is_empty() {
            return LinkMatch::NoConferenceData;
        }

        entry_points
            .iter()
            .filter_map(|ep| ep.uri.as_deref())
            .find(|uri| uri.contains(self.domain_marker.as_str()))
            .map(|uri| LinkMatch::EntryPoint(uri.trim().to_string()))
            .unwrap_or(LinkMatch::NoMatchingEntryPoint)
    }

    /// Converts a web join link into the URI the conferencing client launches.
    ///
    /// `https://acme.zoom.us/j/1234?pwd=abcd` becomes
    /// `zoommtg://acme.zoom.us/join?action=join&confno=1234&pwd=abcd`.
    ///
    /// The meeting number is taken from the `confno` query parameter when
    /// present, otherwise from the last path segment. Links already using the
    /// client scheme, and links that cannot be parsed, are returned unchanged.
    pub fn to_client_uri(&self, link: &str) -> String {
        let link = link.trim();
        let Some(parsed) = parse_lenient(link) else {
            debug!(link, "link is not a valid URL, keeping it as-is");
            return link.to_string();
        };

        if parsed.scheme() == self.client_scheme {
            return link.to_string();
        }

        let Some(host) = parsed.host_str() else {
            debug!(link, "link has no host, keeping it as-is");
            return link.to_string();
        };

        let mut confno: Option<String> = None;
        let mut passcode: Option<String> = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "confno" => confno = Some(value.into_owned()),
                "pwd" => passcode = Some(value.into_owned()),
                _ => {}
            }
        }

        let confno = confno
            .or_else(|| {
                parsed
                    .path_segments()
                    .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let mut uri = format!(
            "{}://{}/join?action=join&confno={}",
            self.client_scheme,
            host,
            urlencoding::encode(&confno)
        );
        if let Some(pwd) = passcode {
            uri.push_str("&pwd=");
            uri.push_str(&urlencoding::encode(&pwd));
        }
        uri
    }
}

/// Parses a URL, assuming `https` when the scheme is missing.
fn parse_lenient(link: &str) -> Option<Url> {
    Url::parse(link)
        .or_else(|_| Url::parse(&format!("https://{link}")))
        .ok()
}

/// Unwraps a Microsoft Outlook SafeLink to get the original URL.
///
/// If the URL is not a SafeLink, it is returned unchanged.
fn unwrap_safelink(url: &str) -> String {
    if let Some(encoded) = SAFELINK_REGEX.captures(url).and_then(|caps| caps.get(1)) {
        if let Ok(decoded) = urlencoding::decode(encoded.as_str()) {
            return decoded.into_owned();
        }
    }
    url.to_string()
}
