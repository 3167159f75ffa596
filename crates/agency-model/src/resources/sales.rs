//! Admin-only sales records: proposals and quote requests

use crate::item::ResourceKind;
use crate::record::{push_opt, Record, Resource};
use crate::status::{ProposalStatus, QuoteStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub status: ProposalStatus,
    #[serde(default)]
    pub total: Option<f64>,
    /// Generated PDF, once rendered
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Proposal {
    fn id(&self) -> Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status(&self) -> &str {
        self.status.as_str()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut out = vec![self.title.as_str()];
        push_opt(&mut out, self.client_name.as_ref());
        push_opt(&mut out, self.client_email.as_ref());
        out
    }

    fn field_values(&self, field: &str) -> Vec<&str> {
        match field {
            "status" => vec![self.status.as_str()],
            _ => Vec::new(),
        }
    }

    fn is_public(&self) -> bool {
        false
    }
}

impl Resource for Proposal {
    const KIND: ResourceKind = ResourceKind::Proposal;
}

/// Quote request submitted from the contact page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// Requested service
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Quote {
    fn id(&self) -> Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &str {
        self.status.as_str()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut out = vec![self.name.as_str()];
        push_opt(&mut out, self.email.as_ref());
        push_opt(&mut out, self.company.as_ref());
        push_opt(&mut out, self.service.as_ref());
        out
    }

    fn field_values(&self, field: &str) -> Vec<&str> {
        let mut out = Vec::new();
        match field {
            "status" => out.push(self.status.as_str()),
            "service" => push_opt(&mut out, self.service.as_ref()),
            _ => {}
        }
        out
    }

    fn is_public(&self) -> bool {
        false
    }
}

impl Resource for Quote {
    const KIND: ResourceKind = ResourceKind::Quote;
}
