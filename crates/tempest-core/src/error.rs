//! Shared error type across Tempest crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Configuration missing, malformed, or out of range.
    BadConfig,
    /// Upstream request could not be completed (network, timeout).
    FetchFailed,
    /// Upstream answered with a non-2xx status.
    UpstreamStatus,
    /// Upstream body did not carry usable observations.
    MalformedResponse,
    /// Map token was never issued or has expired.
    UnknownSession,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::FetchFailed => "FETCH_FAILED",
            ClientCode::UpstreamStatus => "UPSTREAM_STATUS",
            ClientCode::MalformedResponse => "MALFORMED_RESPONSE",
            ClientCode::UnknownSession => "UNKNOWN_SESSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TempestError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum TempestError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("unknown session")]
    UnknownSession,
    #[error("internal: {0}")]
    Internal(String),
}

impl TempestError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TempestError::BadConfig(_) => ClientCode::BadConfig,
            TempestError::FetchFailed(_) => ClientCode::FetchFailed,
            TempestError::UpstreamStatus(_) => ClientCode::UpstreamStatus,
            TempestError::MalformedResponse(_) => ClientCode::MalformedResponse,
            TempestError::UnknownSession => ClientCode::UnknownSession,
            TempestError::Internal(_) => ClientCode::Internal,
        }
    }
}
