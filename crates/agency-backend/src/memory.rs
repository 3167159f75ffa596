//! In-process collection client
//!
//! Serves rows from memory with the same filter and ordering semantics as
//! the hosted backend. Used for local fixtures and for tests.

use crate::client::CollectionClient;
use crate::error::BackendError;
use crate::query::{CollectionQuery, Order};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

/// In-memory collections keyed by resource name
#[derive(Debug, Default)]
pub struct InMemoryClient {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryClient {
    /// Create empty client
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a fixture object `{ "<resource>": [rows...] }`
    ///
    /// # Errors
    /// Returns `BackendError::InvalidResponse` if the value is not an object
    /// of arrays
    pub fn from_value(value: Value) -> Result<Self, BackendError> {
        let Value::Object(map) = value else {
            return Err(BackendError::InvalidResponse(
                "fixture must be an object of resource arrays".to_string(),
            ));
        };
        let client = Self::new();
        for (resource, rows) in map {
            let Value::Array(rows) = rows else {
                return Err(BackendError::InvalidResponse(format!(
                    "fixture resource {resource} is not an array"
                )));
            };
            client.insert_rows(resource, rows);
        }
        Ok(client)
    }

    /// Load a JSON fixture file
    ///
    /// # Errors
    /// Returns `BackendError::Fixture` if the file cannot be read or parsed
    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref();
        let fixture_error = |message: String| BackendError::Fixture {
            path: path.to_path_buf(),
            message,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| fixture_error(e.to_string()))?;
        Self::from_value(value).map_err(|e| fixture_error(e.to_string()))
    }

    /// Append rows to a resource, creating it if needed
    pub fn insert_rows(&self, resource: impl Into<String>, rows: impl IntoIterator<Item = Value>) {
        self.collections
            .write()
            .entry(resource.into())
            .or_default()
            .extend(rows);
    }

    /// Resource names currently served
    #[must_use]
    pub fn resources(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait::async_trait]
impl CollectionClient for InMemoryClient {
    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<Value>, BackendError> {
        let collections = self.collections.read();
        let rows = collections
            .get(&query.resource)
            .ok_or_else(|| BackendError::UnknownResource(query.resource.clone()))?;

        let mut out: Vec<Value> = rows
            .iter()
            .filter(|row| {
                query
                    .equals
                    .iter()
                    .all(|(column, value)| column_equals(row, column, value))
            })
            .cloned()
            .collect();

        if let Some(order) = &query.order {
            out.sort_by(|a, b| order_rows(a, b, order));
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

fn column<'a>(row: &'a Value, name: &str) -> Option<&'a Value> {
    row.as_object().and_then(|obj: &Map<String, Value>| obj.get(name))
}

/// `eq.` semantics: compare the column's text form with the filter value
fn column_equals(row: &Value, name: &str, expected: &str) -> bool {
    match column(row, name) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == expected,
    }
}

/// Ascending puts nulls last, descending puts them first
fn order_rows(a: &Value, b: &Value, order: &Order) -> Ordering {
    let a = column(a, &order.column).filter(|v| !v.is_null());
    let b = column(b, &order.column).filter(|v| !v.is_null());
    let ascending = match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b),
    };
    if order.ascending {
        ascending
    } else {
        ascending.reverse()
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> InMemoryClient {
        InMemoryClient::from_value(json!({
            "jobs": [
                { "title": "Backend Engineer", "status": "open", "created_at": "2024-01-01" },
                { "title": "Designer", "status": "closed", "created_at": "2024-02-01" },
                { "title": "Intern", "status": "open", "created_at": null }
            ],
            "faqs": [
                { "question": "b", "sort_order": 2 },
                { "question": "a", "sort_order": 10 }
            ]
        }))
        .unwrap()
    }

    fn titles(rows: &[Value], key: &str) -> Vec<String> {
        rows.iter()
            .map(|r| r[key].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn equality_filters_apply() {
        let rows = client()
            .fetch(&CollectionQuery::new("jobs").eq("status", "open"))
            .await
            .unwrap();
        assert_eq!(titles(&rows, "title"), vec!["Backend Engineer", "Intern"]);
    }

    #[tokio::test]
    async fn descending_order_puts_nulls_first() {
        let rows = client()
            .fetch(&CollectionQuery::new("jobs").order_by(Order::desc("created_at")))
            .await
            .unwrap();
        assert_eq!(
            titles(&rows, "title"),
            vec!["Intern", "Designer", "Backend Engineer"]
        );
    }

    #[tokio::test]
    async fn numbers_order_numerically() {
        let rows = client()
            .fetch(&CollectionQuery::new("faqs").order_by(Order::asc("sort_order")))
            .await
            .unwrap();
        assert_eq!(titles(&rows, "question"), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn numeric_columns_match_text_filters() {
        let rows = client()
            .fetch(&CollectionQuery::new("faqs").eq("sort_order", "10"))
            .await
            .unwrap();
        assert_eq!(titles(&rows, "question"), vec!["a"]);
    }

    #[tokio::test]
    async fn unknown_resource_is_unclassified() {
        let err = client()
            .fetch(&CollectionQuery::new("widgets"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::UnknownResource(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn fixture_must_be_object_of_arrays() {
        assert!(InMemoryClient::from_value(json!([1, 2])).is_err());
        assert!(InMemoryClient::from_value(json!({ "jobs": 3 })).is_err());
    }

    #[test]
    fn fixture_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.json");
        std::fs::write(&path, r#"{ "services": [ { "title": "SEO" } ] }"#).unwrap();

        let client = InMemoryClient::from_fixture_file(&path).unwrap();
        assert_eq!(client.resources(), vec!["services".to_string()]);

        let missing = InMemoryClient::from_fixture_file(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(BackendError::Fixture { .. })));
    }
}
