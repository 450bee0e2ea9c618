//! Error types for request composition, transport and settings.

use thiserror::Error;

/// Raised while turning a draft into a wire request. The request is not sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid GraphQL variables: {0}")]
    VariablesParse(String),
}

/// The server could not be reached.
///
/// The `Display` text is what ends up in the body of the status-0 envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timed out ({timeout_ms}ms)")]
    Timeout { timeout_ms: u64 },

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Error reading body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Other(String),
}

impl TransportError {
    /// Timeouts and refused connections may succeed on another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Timeout { .. } | TransportError::Connect(_))
    }
}

/// Why the orchestrator refused to start a send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("A request is already in flight for this draft")]
    InFlight,

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Timeout must be between {min} and {max} ms, got {value}")]
    TimeoutOutOfRange { value: u64, min: u64, max: u64 },

    #[error("Unsupported retry count {0}")]
    UnsupportedRetryCount(u8),
}
