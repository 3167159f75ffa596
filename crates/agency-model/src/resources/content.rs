//! Site content: blog posts, services, portfolio projects, FAQs

use crate::item::ResourceKind;
use crate::record::{push_opt, vec_or_null, Record, Resource};
use crate::status::PublishStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Markdown body
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Minutes, as stored by the editor
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::option")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Record for BlogPost {
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
        push_opt(&mut out, self.excerpt.as_ref());
        push_opt(&mut out, self.author.as_ref());
        out.extend(self.tags.iter().map(String::as_str));
        out
    }

    fn field_values(&self, field: &str) -> Vec<&str> {
        let mut out = Vec::new();
        match field {
            "status" => out.push(self.status.as_str()),
            "category" => push_opt(&mut out, self.category.as_ref()),
            "author" => push_opt(&mut out, self.author.as_ref()),
            "tag" | "tags" => out.extend(self.tags.iter().map(String::as_str)),
            "slug" => out.push(self.slug.as_str()),
            _ => {}
        }
        out
    }

    fn is_public(&self) -> bool {
        self.status.is_public()
    }

    fn media_references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        push_opt(&mut out, self.cover_image.as_ref());
        push_opt(&mut out, self.content.as_ref());
        out
    }
}

impl Resource for BlogPost {
    const KIND: ResourceKind = ResourceKind::BlogPost;
}

/// Agency service offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Service {
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
        push_opt(&mut out, self.description.as_ref());
        out
    }

    fn field_values(&self, field: &str) -> Vec<&str> {
        let mut out = Vec::new();
        match field {
            "status" => out.push(self.status.as_str()),
            "category" => push_opt(&mut out, self.category.as_ref()),
            "slug" => out.push(self.slug.as_str()),
            _ => {}
        }
        out
    }

    fn is_public(&self) -> bool {
        self.status.is_public()
    }

    fn media_references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        push_opt(&mut out, self.icon.as_ref());
        out
    }
}

impl Resource for Service {
    const KIND: ResourceKind = ResourceKind::Service;
}

/// Portfolio project or case study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub gallery: Vec<String>,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Project {
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
        push_opt(&mut out, self.client.as_ref());
        push_opt(&mut out, self.summary.as_ref());
        out.extend(self.tags.iter().map(String::as_str));
        out
    }

    fn field_values(&self, field: &str) -> Vec<&str> {
        let mut out = Vec::new();
        match field {
            "status" => out.push(self.status.as_str()),
            "category" => push_opt(&mut out, self.category.as_ref()),
            "client" => push_opt(&mut out, self.client.as_ref()),
            "tag" | "tags" => out.extend(self.tags.iter().map(String::as_str)),
            "slug" => out.push(self.slug.as_str()),
            _ => {}
        }
        out
    }

    fn is_public(&self) -> bool {
        self.status.is_public()
    }

    fn media_references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        push_opt(&mut out, self.image_url.as_ref());
        out.extend(self.gallery.iter().map(String::as_str));
        out
    }
}

impl Resource for Project {
    const KIND: ResourceKind = ResourceKind::Project;
}

/// Frequently asked question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Faq {
    fn id(&self) -> Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.question
    }

    fn status(&self) -> &str {
        self.status.as_str()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.question.as_str(), self.answer.as_str()]
    }

    fn field_values(&self, field: &str) -> Vec<&str> {
        let mut out = Vec::new();
        match field {
            "status" => out.push(self.status.as_str()),
            "category" => push_opt(&mut out, self.category.as_ref()),
            _ => {}
        }
        out
    }

    fn is_public(&self) -> bool {
        self.status.is_public()
    }
}

impl Resource for Faq {
    const KIND: ResourceKind = ResourceKind::Faq;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blog_post_decodes_sparse_row() {
        let row = json!({
            "id": "8d7f6a57-3c0e-4a43-9d2b-1b1a4c4a9e01",
            "title": "Launch notes",
            "status": "published",
            "tags": null,
            "created_at": "2024-03-05T09:00:00Z",
            "view_count": 12
        });
        let post = BlogPost::from_row(row).unwrap();
        assert_eq!(post.title(), "Launch notes");
        assert!(post.tags.is_empty());
        assert!(post.is_public());
        assert!(post.created_at().is_some());
    }

    #[test]
    fn tags_are_multi_valued_filter_fields() {
        let row = json!({
            "id": "8d7f6a57-3c0e-4a43-9d2b-1b1a4c4a9e02",
            "title": "Brand refresh",
            "tags": ["branding", "design"]
        });
        let project = Project::from_row(row).unwrap();
        assert_eq!(project.field_values("tag"), vec!["branding", "design"]);
        assert!(project.field_values("team").is_empty());
        assert_eq!(project.status(), "draft");
    }

    #[test]
    fn faq_title_is_question() {
        let row = json!({
            "id": "8d7f6a57-3c0e-4a43-9d2b-1b1a4c4a9e03",
            "question": "Do you work remotely?",
            "answer": "Yes.",
            "status": "published"
        });
        let faq = Faq::from_row(row).unwrap();
        assert_eq!(faq.title(), "Do you work remotely?");
        assert_eq!(faq.searchable_fields(), vec!["Do you work remotely?", "Yes."]);
    }

    #[test]
    fn missing_title_is_a_decode_error() {
        let row = json!({ "id": "8d7f6a57-3c0e-4a43-9d2b-1b1a4c4a9e04" });
        let err = Service::from_row(row).unwrap_err();
        assert!(err.to_string().contains("services"));
    }
}
