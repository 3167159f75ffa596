//! Resource kinds and the tagged union over every record type

use crate::error::ModelError;
use crate::record::{Record, Resource};
use crate::resources::{BlogPost, Faq, Job, MediaAsset, Project, Proposal, Quote, Service};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Backend collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    BlogPost,
    Service,
    Job,
    Project,
    Proposal,
    Quote,
    Faq,
    Media,
}

impl ResourceKind {
    /// Every kind, in admin menu order
    pub const ALL: [ResourceKind; 8] = [
        Self::BlogPost,
        Self::Service,
        Self::Job,
        Self::Project,
        Self::Proposal,
        Self::Quote,
        Self::Faq,
        Self::Media,
    ];

    /// Collection name on the backend
    #[inline]
    #[must_use]
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::BlogPost => "blog_posts",
            Self::Service => "services",
            Self::Job => "jobs",
            Self::Project => "projects",
            Self::Proposal => "proposals",
            Self::Quote => "quotes",
            Self::Faq => "faqs",
            Self::Media => "media",
        }
    }

    /// Column holding the creation timestamp
    #[inline]
    #[must_use]
    pub fn timestamp_column(self) -> &'static str {
        "created_at"
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_name())
    }
}

impl FromStr for ResourceKind {
    type Err = ModelError;

    /// Accepts the collection name or a singular alias (`job`, `post`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let kind = match normalized.as_str() {
            "blog_posts" | "blog_post" | "blog" | "posts" | "post" => Self::BlogPost,
            "services" | "service" => Self::Service,
            "jobs" | "job" | "careers" => Self::Job,
            "projects" | "project" | "portfolio" => Self::Project,
            "proposals" | "proposal" => Self::Proposal,
            "quotes" | "quote" => Self::Quote,
            "faqs" | "faq" => Self::Faq,
            "media" | "media_assets" | "asset" | "assets" => Self::Media,
            _ => return Err(ModelError::UnknownResource(s.to_string())),
        };
        Ok(kind)
    }
}

/// Any collection item, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollectionItem {
    BlogPost(BlogPost),
    Service(Service),
    Job(Job),
    Project(Project),
    Proposal(Proposal),
    Quote(Quote),
    Faq(Faq),
    Media(MediaAsset),
}

impl CollectionItem {
    /// Decode a backend row of the given kind
    ///
    /// # Errors
    /// Returns `ModelError::Decode` if the row does not fit the record shape
    pub fn from_row(kind: ResourceKind, row: serde_json::Value) -> Result<Self, ModelError> {
        Ok(match kind {
            ResourceKind::BlogPost => Self::BlogPost(BlogPost::from_row(row)?),
            ResourceKind::Service => Self::Service(Service::from_row(row)?),
            ResourceKind::Job => Self::Job(Job::from_row(row)?),
            ResourceKind::Project => Self::Project(Project::from_row(row)?),
            ResourceKind::Proposal => Self::Proposal(Proposal::from_row(row)?),
            ResourceKind::Quote => Self::Quote(Quote::from_row(row)?),
            ResourceKind::Faq => Self::Faq(Faq::from_row(row)?),
            ResourceKind::Media => Self::Media(MediaAsset::from_row(row)?),
        })
    }

    /// Kind of the wrapped record
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::BlogPost(_) => ResourceKind::BlogPost,
            Self::Service(_) => ResourceKind::Service,
            Self::Job(_) => ResourceKind::Job,
            Self::Project(_) => ResourceKind::Project,
            Self::Proposal(_) => ResourceKind::Proposal,
            Self::Quote(_) => ResourceKind::Quote,
            Self::Faq(_) => ResourceKind::Faq,
            Self::Media(_) => ResourceKind::Media,
        }
    }

    /// Wrapped record as a trait object
    #[must_use]
    pub fn as_record(&self) -> &dyn Record {
        match self {
            Self::BlogPost(r) => r,
            Self::Service(r) => r,
            Self::Job(r) => r,
            Self::Project(r) => r,
            Self::Proposal(r) => r,
            Self::Quote(r) => r,
            Self::Faq(r) => r,
            Self::Media(r) => r,
        }
    }
}

impl Record for CollectionItem {
    fn id(&self) -> Uuid {
        self.as_record().id()
    }

    fn title(&self) -> &str {
        self.as_record().title()
    }

    fn status(&self) -> &str {
        self.as_record().status()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.as_record().created_at()
    }

    fn searchable_fields(&self) -> Vec<&str> {
        self.as_record().searchable_fields()
    }

    fn field_values(&self, field: &str) -> Vec<&str> {
        self.as_record().field_values(field)
    }

    fn is_public(&self) -> bool {
        self.as_record().is_public()
    }

    fn media_references(&self) -> Vec<&str> {
        self.as_record().media_references()
    }
}
