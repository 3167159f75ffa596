//! Closed status sets for each record family
//!
//! Wire forms are lowercase, matching what the backend stores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Editorial status of site content (posts, services, projects, FAQs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    /// Work in progress, admin only
    #[default]
    Draft,
    /// Live on the public site
    Published,
    /// Retired from the site but kept
    Archived,
}

impl PublishStatus {
    /// Wire form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Check if visible on the public site
    #[inline]
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Job posting status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepting applications
    #[default]
    Open,
    /// No longer accepting applications
    Closed,
}

impl JobStatus {
    /// Wire form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Proposal lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    /// Wire form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// Quote request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Declined,
}

impl QuoteStatus {
    /// Wire form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_matches_serde() {
        let json = serde_json::to_string(&PublishStatus::Published).unwrap();
        assert_eq!(json, format!("\"{}\"", PublishStatus::Published.as_str()));

        let status: JobStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(status, JobStatus::Closed);
    }

    #[test]
    fn only_published_is_public() {
        assert!(PublishStatus::Published.is_public());
        assert!(!PublishStatus::Draft.is_public());
        assert!(!PublishStatus::Archived.is_public());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<QuoteStatus>("\"lost\"").is_err());
    }
}
