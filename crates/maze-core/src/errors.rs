use std::time::Duration;

/// Failures raised by a [`MazeTransport`](crate::transport::MazeTransport).
/// Classified so that callers can decide whether re-sending is worthwhile.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("maze service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::InvalidEndpoint(_) => false,
        }
    }

    /// Short classification string for log fields.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::Timeout(_) => "timeout",
            Self::InvalidEndpoint(_) => "invalid_endpoint",
        }
    }

    /// Build the error for a non-2xx HTTP status.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

/// Errors surfaced by navigation operations. None of them modify the
/// navigation state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl NavError {
    /// Whether re-issuing the same command can succeed. A malformed response
    /// qualifies because the previous location token is still valid.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_retryable(),
            Self::MalformedResponse(_) => true,
            Self::InvalidState(_) => false,
        }
    }

    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport_failure",
            Self::MalformedResponse(_) => "malformed_response",
            Self::InvalidState(_) => "invalid_state",
        }
    }
}
