//! Failure taxonomy for LLM queries.

use std::time::Duration;

use thiserror::Error;

/// Coarse failure class, what the UI switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unconfigured,
    NoConnection,
    Timeout,
    ServerError,
    RequestError,
    TransportError,
    CacheUnavailable,
}

/// Why a question did not produce an answer.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("API key not configured. Please add API_KEY.txt to the activity data directory.")]
    Unconfigured,

    #[error("no internet connection")]
    NoConnection,

    #[error("the request timed out after {} seconds, the server might be slow", .0.as_secs())]
    Timeout(Duration),

    #[error("server error: {0}")]
    ServerError(u16),

    #[error("request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    #[error("response is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl AskError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AskError::Unconfigured => FailureKind::Unconfigured,
            AskError::NoConnection => FailureKind::NoConnection,
            AskError::Timeout(_) => FailureKind::Timeout,
            AskError::ServerError(_) => FailureKind::ServerError,
            AskError::Request { .. } | AskError::InvalidBody(_) => FailureKind::RequestError,
            AskError::Transport(_) => FailureKind::TransportError,
        }
    }

    /// `true` when retrying later may help, `false` for configuration problems.
    pub fn is_transient(&self) -> bool {
        !matches!(self.kind(), FailureKind::Unconfigured | FailureKind::CacheUnavailable)
    }

    /// Short hint for the person asking.
    pub fn user_hint(&self) -> &'static str {
        match self.kind() {
            FailureKind::Unconfigured => "Please ask your teacher to set up the API key.",
            FailureKind::NoConnection => "Check your internet connection and try again.",
            FailureKind::Timeout | FailureKind::ServerError => "The server is busy, please try again in a moment.",
            _ if self.is_transient() => "Something went wrong, please try again.",
            _ => "Please check the activity settings.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(AskError::Timeout(Duration::from_secs(120)).kind(), FailureKind::Timeout);
        assert_eq!(AskError::ServerError(503).kind(), FailureKind::ServerError);
        assert_eq!(AskError::InvalidBody("x".into()).kind(), FailureKind::RequestError);
        assert_eq!(AskError::Request { status: 404, body: String::new() }.kind(), FailureKind::RequestError);
        assert_ne!(AskError::Timeout(Duration::from_secs(1)).kind(), FailureKind::RequestError);
    }

    #[test]
    fn test_transient_vs_configuration() {
        assert!(!AskError::Unconfigured.is_transient());
        assert!(AskError::NoConnection.is_transient());
        assert!(AskError::ServerError(500).is_transient());
    }

    #[test]
    fn test_timeout_message() {
        let msg = AskError::Timeout(Duration::from_secs(120)).to_string();
        assert!(msg.contains("120 seconds"));
    }
}
