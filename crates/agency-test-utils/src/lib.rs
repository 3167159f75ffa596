//! Testing utilities for the agency workspace
//!
//! Shared fixtures, a scripted backend client, and row builders.

#![allow(missing_docs)]

use agency_backend::{BackendError, CollectionClient, CollectionQuery, InMemoryClient};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Outcome = Result<Vec<Value>, BackendError>;

/// Client that replays a fixed sequence of outcomes
///
/// Once the script runs out every call returns the fallback, which
/// defaults to an empty collection.
#[derive(Debug)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<Outcome>>,
    fallback: Outcome,
    delay: Duration,
    calls: AtomicUsize,
    queries: Mutex<Vec<CollectionQuery>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Ok(Vec::new()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Next call succeeds with `rows`
    #[must_use]
    pub fn then_ok(self, rows: Vec<Value>) -> Self {
        self.script.lock().push_back(Ok(rows));
        self
    }

    /// Next call fails with `err`
    #[must_use]
    pub fn then_err(self, err: BackendError) -> Self {
        self.script.lock().push_back(Err(err));
        self
    }

    /// Next `n` calls fail with `err`
    #[must_use]
    pub fn then_err_times(self, err: &BackendError, n: usize) -> Self {
        (0..n).fold(self, |client, _| client.then_err(err.clone()))
    }

    /// Outcome once the script is exhausted
    #[must_use]
    pub fn otherwise(mut self, outcome: Outcome) -> Self {
        self.fallback = outcome;
        self
    }

    /// Every call takes `delay` before answering
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<CollectionQuery> {
        self.queries.lock().clone()
    }
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CollectionClient for ScriptedClient {
    async fn fetch(&self, query: &CollectionQuery) -> Result<Vec<Value>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(query.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Transient failure (request timeout)
pub fn transient() -> BackendError {
    BackendError::Timeout(Duration::from_secs(10))
}

/// Permission failure as row-level security reports it
pub fn permission_denied() -> BackendError {
    BackendError::PermissionDenied("permission denied for table jobs".into())
}

/// Deterministic id for fixture row `n`
pub fn fixture_id(n: u32) -> String {
    format!("00000000-0000-4000-8000-{n:012}")
}

pub fn job_row(n: u32, title: &str, status: &str, created_at: &str) -> Value {
    json!({
        "id": fixture_id(n),
        "title": title,
        "status": status,
        "team": "Eng",
        "location": "Lisbon",
        "type": "full-time",
        "created_at": created_at,
    })
}

pub fn post_row(n: u32, title: &str, status: &str, created_at: &str) -> Value {
    json!({
        "id": fixture_id(n),
        "title": title,
        "slug": agency_model::slugify(title),
        "content": format!("# {title}\n\nSome words about {title}."),
        "status": status,
        "created_at": created_at,
    })
}

/// One open backend role from January, one closed design role from February
pub fn jobs_scenario() -> Vec<Value> {
    vec![
        job_row(1, "Backend Engineer", "open", "2024-01-01"),
        job_row(2, "Designer", "closed", "2024-02-01"),
    ]
}

/// `count` jobs, alternating open/closed, one day apart
pub fn many_jobs(count: u32) -> Vec<Value> {
    (1..=count)
        .map(|n| {
            let status = if n % 2 == 0 { "closed" } else { "open" };
            let day = (n - 1) % 28 + 1;
            let month = (n - 1) / 28 % 12 + 1;
            job_row(n, &format!("Role {n:03}"), status, &format!("2024-{month:02}-{day:02}"))
        })
        .collect()
}

/// Published and draft posts
pub fn posts_scenario() -> Vec<Value> {
    vec![
        post_row(10, "Launching Our New Site", "published", "2024-03-01T09:00:00Z"),
        post_row(11, "Draft Roadmap", "draft", "2024-03-05T09:00:00Z"),
        post_row(12, "Hiring in Lisbon", "published", "2024-02-10T09:00:00Z"),
    ]
}

/// In-memory backend holding the job and post scenarios
pub fn seeded_memory_client() -> InMemoryClient {
    let client = InMemoryClient::new();
    client.insert_rows("jobs", jobs_scenario());
    client.insert_rows("blog_posts", posts_scenario());
    client
}
