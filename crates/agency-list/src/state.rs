//! Fetch lifecycle state

use agency_backend::ErrorKind;
use serde::Serialize;
use std::fmt;

/// Where a controller is in its fetch lifecycle
///
/// Loaded items live in the snapshot rather than in `Success`, so an
/// `Error` can still be shown next to the last good data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchState {
    /// No load has settled yet
    #[default]
    Idle,
    /// First attempt of a load is outstanding
    Loading,
    /// Waiting to make retry number `attempt`
    Retrying {
        /// Retry number, starting at 1
        attempt: u32,
    },
    /// Last load delivered items
    Success,
    /// Last load failed
    Error {
        /// Failure class
        kind: ErrorKind,
        /// Backend or decode message
        message: String,
    },
}

impl FetchState {
    /// Whether a fetch or backoff is outstanding
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Loading | Self::Retrying { .. })
    }

    /// Whether the last load failed
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Error kind, if failed
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loading => f.write_str("loading"),
            Self::Retrying { attempt } => write!(f, "retrying (retry {attempt})"),
            Self::Success => f.write_str("success"),
            Self::Error { kind, message } => write!(f, "error ({kind}): {message}"),
        }
    }
}
