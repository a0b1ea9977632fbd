//! Meeting resolution engine: raw events, links, normalization, resolution
//!
//! ```text
//!  RawEvent ──► normalize (links) ──► NormalizedMeeting ──► candidates ──► resolve
//!                                                                            │
//!                                                                            ▼
//!                                                                  ResolutionOutcome
//! ```
//!
//! Everything in this crate is a pure function of its inputs. The reference
//! time is always passed in explicitly; nothing here reads the system clock.

pub mod config;
pub mod links;
pub mod meeting;
pub mod normalize;
pub mod raw_event;
pub mod resolve;
pub mod time;
pub mod tracing;

pub use config::EngineConfig;
pub use links::{LinkExtractor, LinkMatch};
pub use meeting::NormalizedMeeting;
pub use normalize::EventNormalizer;
pub use raw_event::{RawConferenceData, RawEntryPoint, RawEvent, RawEventTime};
pub use resolve::{MeetingEngine, Resolution, ResolutionOutcome, candidates, resolve};
pub use time::{EventTime, TimeWindow};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
