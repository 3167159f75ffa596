//! Record traits shared by every collection item
//!
//! The list machinery never looks at concrete record types. It sees items
//! only through [`Record`], so one controller and one predicate set serve
//! every admin screen and public listing.

use crate::error::ModelError;
use crate::item::ResourceKind;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Read-only view of one collection item
///
/// # Contract
/// - `searchable_fields` lists the values free-text search looks at, in a
///   stable order
/// - `field_values` returns every value of a named classification field;
///   single-valued fields yield at most one value, tag-like fields several.
///   Unknown field names yield nothing
pub trait Record {
    /// Stable identifier assigned by the backend
    fn id(&self) -> Uuid;

    /// Human-readable title or name
    fn title(&self) -> &str;

    /// Status in its wire form (`"draft"`, `"open"`, ...)
    fn status(&self) -> &str;

    /// Creation timestamp, if the backend recorded one
    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Values matched by free-text search
    fn searchable_fields(&self) -> Vec<&str>;

    /// Values of a named classification field
    fn field_values(&self, field: &str) -> Vec<&str>;

    /// Whether anonymous visitors of the public site may see this item
    fn is_public(&self) -> bool;

    /// URLs and storage paths of media this item points at
    fn media_references(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// A record type stored in exactly one backend collection
pub trait Resource: Record + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection this type is stored in
    const KIND: ResourceKind;

    /// Decode a backend row
    ///
    /// # Errors
    /// Returns `ModelError::Decode` if the row does not fit the record shape
    fn from_row(row: serde_json::Value) -> Result<Self, ModelError> {
        serde_json::from_value(row).map_err(|e| ModelError::decode(Self::KIND, e))
    }
}

/// Push an optional field onto a value list
#[inline]
pub(crate) fn push_opt<'a>(out: &mut Vec<&'a str>, value: Option<&'a String>) {
    if let Some(v) = value {
        out.push(v.as_str());
    }
}

/// Decode a list column that may be `null`
pub(crate) fn vec_or_null<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<String>> = serde::Deserialize::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}
