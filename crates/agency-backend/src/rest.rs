//! HTTP client for the hosted backend's REST interface
//!
//! Speaks the PostgREST dialect: `GET {base}/rest/v1/{resource}` with
//! `column=eq.value` filters and `order=column.dir`.

use crate::client::CollectionClient;
use crate::error::BackendError;
use crate::query::CollectionQuery;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// REST client configuration
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub base_url: String,
    /// Anonymous or service API key
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl RestConfig {
    /// Create configuration with the default timeout
    #[inline]
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// PostgREST collection client
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
    timeout: Duration,
}

impl RestClient {
    /// Create client
    ///
    /// # Errors
    /// Returns `BackendError::Config` if the base URL or API key is unusable
    pub fn new(config: RestConfig) -> Result<Self, BackendError> {
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = reqwest::Url::parse(&base)
            .map_err(|e| BackendError::Config(format!("invalid backend url {base}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| BackendError::Config(format!("invalid api key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| BackendError::Config(format!("invalid api key: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Config(format!("cannot build http client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
        })
    }

    /// URL of a resource endpoint
    fn resource_url(&self, resource: &str) -> Result<reqwest::Url, BackendError> {
        self.base_url
            .join(&format!("rest/v1/{resource}"))
            .map_err(|e| BackendError::Config(format!("invalid resource {resource}: {e}")))
    }

    fn transport_error(&self, err: &reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else if err.is_decode() {
            BackendError::InvalidResponse(err.to_string())
        } else {
            BackendError::Network(err.to_string())
        }
    }
}

#[async_trait::async_trait]
impl CollectionClient for RestClient {
    #[instrument(name = "rest_fetch", skip(self), fields(resource = %query.resource))]
    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<Value>, BackendError> {
        let url = self.resource_url(&query.resource)?;
        let response = self
            .http
            .get(url)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            let parsed: Option<ErrorBody> = serde_json::from_str(&body).ok();
            let (code, message) = match parsed {
                Some(ErrorBody { code, message }) => {
                    (code, message.unwrap_or_else(|| body.clone()))
                }
                None => (None, body),
            };
            tracing::debug!(status = status.as_u16(), ?code, "backend rejected request");
            return Err(BackendError::Status {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let rows: Vec<Value> = serde_json::from_str(&body)
            .map_err(|e| BackendError::InvalidResponse(format!("expected row array: {e}")))?;
        tracing::debug!(rows = rows.len(), "fetched rows");
        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}
