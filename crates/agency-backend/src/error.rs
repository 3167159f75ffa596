//! Backend error taxonomy
//!
//! Every failure maps onto one of three kinds:
//! - permission denied: terminal, shown to the user, never retried
//! - transient: network trouble or timeouts, retried with backoff
//! - unclassified: anything else, treated as terminal

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// PostgREST error code for insufficient privilege
const PG_INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Failure classification driving retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller lacks access, retrying cannot help
    PermissionDenied,
    /// Network or timeout, worth retrying
    Transient,
    /// Anything else
    Unclassified,
}

impl ErrorKind {
    /// Short label for logs and banners
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::Transient => "transient",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend client errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    /// Access rejected before reaching the data
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// No response within the request timeout
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Connection could not be established or was dropped
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Backend error code, if the body carried one
        code: Option<String>,
        /// Backend error message or raw body
        message: String,
    },

    /// Response body was not a list of rows
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not served by this client
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// Fixture file missing or malformed
    #[error("cannot load fixture {}: {message}", .path.display())]
    Fixture {
        /// Fixture path
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Client misconfigured
    #[error("configuration error: {0}")]
    Config(String),
}

impl BackendError {
    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::Timeout(_) | Self::Network(_) => ErrorKind::Transient,
            Self::Status { status, code, .. } => classify_status(*status, code.as_deref()),
            Self::InvalidResponse(_)
            | Self::UnknownResource(_)
            | Self::Fixture { .. }
            | Self::Config(_) => ErrorKind::Unclassified,
        }
    }

    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

/// Map an HTTP status and backend error code onto an [`ErrorKind`]
#[must_use]
pub fn classify_status(status: u16, code: Option<&str>) -> ErrorKind {
    if code == Some(PG_INSUFFICIENT_PRIVILEGE) {
        return ErrorKind::PermissionDenied;
    }
    match status {
        401 | 403 => ErrorKind::PermissionDenied,
        408 | 429 | 500..=599 => ErrorKind::Transient,
        _ => ErrorKind::Unclassified,
    }
}
