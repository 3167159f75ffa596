//! Media library assets and the orphan scan

use crate::item::ResourceKind;
use crate::record::{push_opt, Record, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File in the hosted media bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: Uuid,
    pub file_name: String,
    /// Path inside the storage bucket
    #[serde(default)]
    pub storage_path: String,
    #[serde(default)]
    pub public_url: String,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl MediaAsset {
    /// Check if any reference string points at this asset
    #[must_use]
    pub fn is_referenced_by(&self, reference: &str) -> bool {
        (!self.public_url.is_empty() && reference.contains(&self.public_url))
            || (!self.storage_path.is_empty() && reference.contains(&self.storage_path))
    }
}

impl Record for MediaAsset {
    fn id(&self) -> Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.file_name
    }

    fn status(&self) -> &str {
        "active"
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut out = vec![self.file_name.as_str()];
        push_opt(&mut out, self.alt_text.as_ref());
        out
    }

    fn field_values(&self, field: &str) -> Vec<&str> {
        let mut out = Vec::new();
        match field {
            "folder" => push_opt(&mut out, self.folder.as_ref()),
            "mime_type" => push_opt(&mut out, self.mime_type.as_ref()),
            "status" => out.push("active"),
            _ => {}
        }
        out
    }

    fn is_public(&self) -> bool {
        true
    }
}

impl Resource for MediaAsset {
    const KIND: ResourceKind = ResourceKind::Media;
}

/// Find media assets no content references
///
/// A reference is any string a content record carries that may embed an
/// asset location: cover images, galleries, or whole markdown bodies. An
/// asset is referenced when its public URL or storage path occurs inside
/// some reference.
///
/// # Returns
/// Unreferenced assets, in input order
pub fn find_orphans<'a, I, S>(assets: &'a [MediaAsset], references: I) -> Vec<&'a MediaAsset>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let references: Vec<S> = references.into_iter().collect();
    assets
        .iter()
        .filter(|asset| {
            !references
                .iter()
                .any(|r| asset.is_referenced_by(r.as_ref()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> MediaAsset {
        MediaAsset {
            id: Uuid::new_v4(),
            file_name: name.to_string(),
            storage_path: format!("uploads/{name}"),
            public_url: format!("https://cdn.example.com/media/uploads/{name}"),
            folder: None,
            mime_type: Some("image/png".to_string()),
            size_bytes: None,
            alt_text: None,
            created_at: None,
        }
    }

    #[test]
    fn referenced_assets_are_not_orphans() {
        let assets = vec![asset("hero.png"), asset("old.png"), asset("team.png")];
        let refs = vec![
            "https://cdn.example.com/media/uploads/hero.png".to_string(),
            "Meet us: ![team](https://cdn.example.com/media/uploads/team.png)".to_string(),
        ];

        let orphans = find_orphans(&assets, &refs);
        let names: Vec<&str> = orphans.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["old.png"]);
    }

    #[test]
    fn storage_path_counts_as_reference() {
        let assets = vec![asset("logo.png")];
        let orphans = find_orphans(&assets, ["uploads/logo.png"]);
        assert!(orphans.is_empty());
    }

    #[test]
    fn everything_is_orphaned_without_references() {
        let assets = vec![asset("a.png"), asset("b.png")];
        let orphans = find_orphans(&assets, Vec::<String>::new());
        assert_eq!(orphans.len(), 2);
    }
}
