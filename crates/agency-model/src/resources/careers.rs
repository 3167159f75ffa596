//! Careers page job postings

use crate::item::ResourceKind;
use crate::record::{push_opt, Record, Resource};
use crate::status::JobStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    /// Hiring team, e.g. `Eng` or `Design`
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// `remote`, `hybrid` or `onsite`
    #[serde(default)]
    pub work_mode: Option<String>,
    /// `full-time`, `part-time`, `contract`, ...
    #[serde(default, rename = "type")]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Job {
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
        push_opt(&mut out, self.team.as_ref());
        push_opt(&mut out, self.location.as_ref());
        out
    }

    fn field_values(&self, field: &str) -> Vec<&str> {
        let mut out = Vec::new();
        match field {
            "status" => out.push(self.status.as_str()),
            "team" => push_opt(&mut out, self.team.as_ref()),
            "location" => push_opt(&mut out, self.location.as_ref()),
            "work_mode" => push_opt(&mut out, self.work_mode.as_ref()),
            "type" | "employment_type" => push_opt(&mut out, self.employment_type.as_ref()),
            _ => {}
        }
        out
    }

    fn is_public(&self) -> bool {
        matches!(self.status, JobStatus::Open)
    }
}

impl Resource for Job {
    const KIND: ResourceKind = ResourceKind::Job;
}
