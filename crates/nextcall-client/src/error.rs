//! Client error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The event dump could not be read.
    #[error("failed to read events from {}: {source}", path.display())]
    ReadEvents {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The event dump is not valid calendar JSON.
    #[error("failed to parse events: {0}")]
    ParseEvents(#[from] serde_json::Error),

    /// Output could not be produced.
    #[error("failed to render output: {0}")]
    Output(String),

    /// There is no single meeting to join.
    #[error("no meeting to join: {0}")]
    NothingToJoin(String),

    /// Action failed (open, etc).
    #[error("action failed: {0}")]
    Action(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
