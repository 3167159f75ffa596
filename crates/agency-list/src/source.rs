//! What a controller fetches and how rows become items

use agency_backend::{CollectionQuery, Order};
use agency_model::{CollectionItem, ModelError, Resource, ResourceKind};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Decoder<T> = Arc<dyn Fn(Value) -> Result<T, ModelError> + Send + Sync>;

/// Backend query plus row decoder for one collection
pub struct ListSource<T> {
    query: CollectionQuery,
    decode: Decoder<T>,
}

impl<T: Resource> ListSource<T> {
    /// Typed source for a resource, newest rows first
    #[must_use]
    pub fn resource() -> Self {
        Self::new(default_query(T::KIND), T::from_row)
    }
}

impl ListSource<CollectionItem> {
    /// Source for a kind picked at runtime
    #[must_use]
    pub fn dynamic(kind: ResourceKind) -> Self {
        Self::new(default_query(kind), move |row| {
            CollectionItem::from_row(kind, row)
        })
    }
}

impl<T> ListSource<T> {
    /// Create new source from a query and decoder
    pub fn new<F>(query: CollectionQuery, decode: F) -> Self
    where
        F: Fn(Value) -> Result<T, ModelError> + Send + Sync + 'static,
    {
        Self {
            query,
            decode: Arc::new(decode),
        }
    }

    /// With a server-side equality filter
    #[inline]
    #[must_use]
    pub fn with_eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.query = self.query.eq(column, value);
        self
    }

    /// Query sent on every fetch
    #[must_use]
    pub fn query(&self) -> &CollectionQuery {
        &self.query
    }

    /// Backend collection name
    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.query.resource
    }

    /// Decode every row, failing on the first bad one
    pub fn decode_rows(&self, rows: Vec<Value>) -> Result<Vec<T>, ModelError> {
        rows.into_iter().map(|row| (self.decode)(row)).collect()
    }
}

impl<T> Clone for ListSource<T> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<T> fmt::Debug for ListSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSource")
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

fn default_query(kind: ResourceKind) -> CollectionQuery {
    CollectionQuery::new(kind.resource_name()).order_by(Order::desc(kind.timestamp_column()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_model::{Job, Record};
    use serde_json::json;

    #[test]
    fn typed_source_targets_the_resource_table() {
        let source = ListSource::<Job>::resource().with_eq("status", "open");
        assert_eq!(source.resource_name(), "jobs");
        assert_eq!(
            source.query().to_string(),
            "jobs status=open order=created_at.desc"
        );
    }

    #[test]
    fn dynamic_source_decodes_into_items() {
        let source = ListSource::dynamic(ResourceKind::Faq);
        let items = source
            .decode_rows(vec![json!({
                "id": "6f1c1a0e-3d7b-4e55-9b8e-0c0d5f7b2a11",
                "question": "Do you work remotely?",
                "answer": "Yes.",
                "status": "published"
            })])
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind(), ResourceKind::Faq);
        assert_eq!(items[0].title(), "Do you work remotely?");
    }

    #[test]
    fn bad_row_fails_the_batch() {
        let source = ListSource::<Job>::resource();
        assert!(source.decode_rows(vec![json!({"id": 7})]).is_err());
    }
}
