//! Remote collection client seam

use crate::error::BackendError;
use crate::query::CollectionQuery;
use serde_json::Value;
use std::sync::Arc;

/// Fetches rows of a named collection
///
/// Implementations return raw JSON rows as the backend produced them;
/// decoding into typed records happens in the caller. Errors must be
/// classifiable through [`BackendError::kind`].
#[async_trait::async_trait]
pub trait CollectionClient: Send + Sync {
    /// Fetch every row matching the query
    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<Value>, BackendError>;

    /// Client name (for logging)
    fn name(&self) -> &'static str;
}

#[async_trait::async_trait]
impl<C: CollectionClient + ?Sized> CollectionClient for Arc<C> {
    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<Value>, BackendError> {
        (**self).fetch(query).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
