//! Error types for llm-inside-out.

use thiserror::Error;

/// Result type alias for llm-inside-out operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for llm-inside-out.
#[derive(Error, Debug)]
pub enum Error {
    /// The selected word is not among the session's current candidates.
    #[error("'{0}' is not one of the current candidates")]
    NotACandidate(String),

    /// An advance was requested while the previous one is still computing.
    #[error("session is still computing the previous step")]
    SessionBusy,

    /// No advance is in flight, so there is nothing to complete.
    #[error("no advance is in progress")]
    NotComputing,

    /// Transition table failed validation.
    #[error("invalid transition table: {0}")]
    InvalidTable(String),

    /// Unknown lesson, role preset or topic name.
    #[error("unknown {kind}: {name}")]
    Unknown { kind: &'static str, name: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error from the chat collaborator.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
