//! Fetch-with-retry list controller
//!
//! A controller owns the items of one collection. `load` drives the fetch
//! lifecycle on the caller's task; every state change is published as a
//! [`ListSnapshot`] on a watch channel. The mutex is never held across an
//! await point, and each load carries a generation number plus a child
//! cancellation token so abandoned loads cannot write state.

use crate::context::{ControllerContext, Notice};
use crate::retry::{BackoffPolicy, RetryPolicy};
use crate::snapshot::ListSnapshot;
use crate::source::ListSource;
use crate::state::FetchState;
use agency_backend::{BackendError, CollectionClient, ErrorKind};
use agency_model::Record;
use agency_query::{derive_indices, FilterCriteria, Pagination, QueryError};
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Construction options for a [`ListController`]
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Retry and slow-connection timing
    pub policy: RetryPolicy,
    /// Starting page and page size
    pub pagination: Pagination,
    /// Criteria in force before the first load
    pub criteria: FilterCriteria,
}

impl ListOptions {
    /// Create new options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With retry policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// With pagination
    #[inline]
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// With initial criteria
    #[inline]
    #[must_use]
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }
}

/// Generic list controller
///
/// Cloning yields another handle onto the same controller, so a load can
/// run on a spawned task while the screen keeps changing criteria.
pub struct ListController<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    client: Arc<dyn CollectionClient>,
    source: ListSource<T>,
    policy: RetryPolicy,
    context: ControllerContext,
    inner: Mutex<Inner<T>>,
    updates: watch::Sender<ListSnapshot<T>>,
    root: CancellationToken,
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

struct Inner<T> {
    items: Vec<T>,
    view: Vec<usize>,
    criteria: FilterCriteria,
    pagination: Pagination,
    state: FetchState,
    retries: u32,
    slow: bool,
    slow_notified: bool,
    in_flight: bool,
    generation: u64,
    load_token: CancellationToken,
}

impl<T: Record + Clone> Inner<T> {
    fn rederive(&mut self) {
        self.view = derive_indices(&self.items, &self.criteria);
    }

    fn snapshot(&self) -> ListSnapshot<T> {
        let page = self.pagination.bounds(self.view.len());
        let items = self.view[page.start..page.end]
            .iter()
            .map(|&index| self.items[index].clone())
            .collect();
        ListSnapshot {
            state: self.state.clone(),
            items,
            total: self.items.len(),
            filtered: self.view.len(),
            page,
            slow_connection: self.slow,
            retries: self.retries,
            criteria: self.criteria.clone(),
        }
    }
}

impl<T> ListController<T>
where
    T: Record + Clone + Send + Sync + 'static,
{
    /// Create new controller; nothing is fetched until [`load`](Self::load)
    pub fn new<C>(
        client: C,
        source: ListSource<T>,
        options: ListOptions,
        context: ControllerContext,
    ) -> Self
    where
        C: CollectionClient + 'static,
    {
        let root = CancellationToken::new();
        let mut inner = Inner {
            items: Vec::new(),
            view: Vec::new(),
            criteria: options.criteria,
            pagination: options.pagination,
            state: FetchState::Idle,
            retries: 0,
            slow: false,
            slow_notified: false,
            in_flight: false,
            generation: 0,
            load_token: root.child_token(),
        };
        inner.rederive();
        let (updates, _rx) = watch::channel(inner.snapshot());
        Self {
            shared: Arc::new(Shared {
                client: Arc::new(client),
                source,
                policy: options.policy,
                context,
                inner: Mutex::new(inner),
                updates,
                root,
            }),
        }
    }

    /// Fetch the collection, retrying transient failures
    ///
    /// Returns the settled state. A call while another load is in flight,
    /// or after [`dispose`](Self::dispose), does nothing and returns the
    /// current state. Dropping the future before it settles cancels the
    /// fetch and restores the state the load started from.
    #[instrument(
        name = "list_load",
        skip(self),
        fields(resource = %self.shared.source.resource_name())
    )]
    pub async fn load(&self) -> FetchState {
        if let Some((token, generation, previous)) = self.begin() {
            let guard = AbandonGuard {
                shared: &self.shared,
                generation,
                previous: Some(previous),
            };
            self.run(&token, generation).await;
            drop(guard);
        }
        self.state()
    }

    /// Abandon any pending load and start over with a fresh retry budget
    pub async fn retry(&self) -> FetchState {
        {
            let mut inner = self.shared.inner.lock();
            inner.load_token.cancel();
            inner.in_flight = false;
            inner.generation += 1;
        }
        debug!(resource = %self.shared.source.resource_name(), "manual retry");
        self.load().await
    }

    /// Replace criteria and re-derive the view from loaded items
    ///
    /// Never fetches. A change of criteria returns to the first page.
    pub fn set_criteria(&self, criteria: FilterCriteria) {
        self.commit(None, |inner| {
            if inner.criteria != criteria {
                inner.pagination.page = 1;
            }
            inner.criteria = criteria;
            inner.rederive();
        });
    }

    /// Jump to a page, clamped into range
    pub fn set_page(&self, page: usize) {
        self.commit(None, |inner| {
            let last = inner.pagination.page_count(inner.view.len());
            inner.pagination.page = page.clamp(1, last);
        });
    }

    /// Change page size and return to the first page
    ///
    /// # Errors
    /// Returns `QueryError::ZeroPageSize` if `page_size` is zero
    pub fn set_page_size(&self, page_size: usize) -> Result<(), QueryError> {
        let pagination = Pagination::new(1, page_size)?;
        self.commit(None, |inner| inner.pagination = pagination);
        Ok(())
    }

    /// Stop all work; later loads and updates are ignored
    pub fn dispose(&self) {
        if !self.shared.root.is_cancelled() {
            debug!(resource = %self.shared.source.resource_name(), "controller disposed");
            self.shared.root.cancel();
        }
    }

    /// Whether [`dispose`](Self::dispose) has been called
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.shared.root.is_cancelled()
    }

    /// Receiver that sees every published snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<T>> {
        self.shared.updates.subscribe()
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot<T> {
        self.shared.updates.borrow().clone()
    }

    /// Current fetch state
    #[must_use]
    pub fn state(&self) -> FetchState {
        self.shared.inner.lock().state.clone()
    }

    /// Criteria currently applied to the view
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        self.shared.inner.lock().criteria.clone()
    }

    /// Backend collection this controller lists
    #[must_use]
    pub fn resource_name(&self) -> &str {
        self.shared.source.resource_name()
    }

    fn begin(&self) -> Option<(CancellationToken, u64, FetchState)> {
        let shared = &self.shared;
        let mut inner = shared.inner.lock();
        if shared.root.is_cancelled() {
            debug!("controller disposed, load ignored");
            return None;
        }
        if inner.in_flight {
            debug!("load already in flight");
            return None;
        }
        inner.in_flight = true;
        inner.generation += 1;
        inner.retries = 0;
        inner.slow = false;
        inner.slow_notified = false;
        let mut previous = std::mem::replace(&mut inner.state, FetchState::Loading);
        if previous.is_pending() {
            // a load superseded by `retry` never settled
            previous = FetchState::Idle;
        }
        inner.load_token = shared.root.child_token();
        shared.updates.send_replace(inner.snapshot());
        Some((inner.load_token.clone(), inner.generation, previous))
    }

    async fn run(&self, token: &CancellationToken, generation: u64) {
        let policy = self.shared.policy;
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let outcome = tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(attempt, "load abandoned");
                    return;
                }
                outcome = self.fetch_watching_slow(generation) => outcome,
            };

            let err = match outcome {
                Ok(rows) => {
                    self.settle_rows(generation, rows);
                    return;
                }
                Err(err) => err,
            };

            let kind = err.kind();
            if kind != ErrorKind::Transient {
                warn!(%kind, error = %err, "load failed, not retrying");
                self.settle_error(generation, kind, err.to_string(), None);
                return;
            }
            if attempt >= max_attempts {
                warn!(attempt, error = %err, "retries exhausted");
                self.settle_error(generation, kind, err.to_string(), None);
                return;
            }
            if self.shared.context.is_offline() {
                warn!(attempt, error = %err, "offline, not scheduling a retry");
                let notice = Notice::Offline {
                    resource: self.resource_name().to_string(),
                };
                self.settle_error(generation, kind, err.to_string(), Some(notice));
                return;
            }

            let delay = policy.delay_for_retry(attempt);
            warn!(attempt, ?delay, error = %err, "transient failure, retrying");
            let scheduled = self.commit(Some(generation), |inner| {
                inner.retries = attempt;
                inner.slow = false;
                inner.state = FetchState::Retrying { attempt };
            });
            if !scheduled {
                return;
            }

            tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(attempt, "pending retry abandoned");
                    return;
                }
                () = tokio::time::sleep(delay) => {}
            }
            attempt += 1;
        }
    }

    /// Fetch once, raising the slow flag if the threshold passes first
    async fn fetch_watching_slow(&self, generation: u64) -> Result<Vec<Value>, BackendError> {
        let shared = &self.shared;
        let fetch = shared.client.fetch(shared.source.query());
        tokio::pin!(fetch);
        let threshold = tokio::time::sleep(shared.policy.slow_threshold());
        tokio::pin!(threshold);
        let mut flagged = false;
        loop {
            tokio::select! {
                outcome = &mut fetch => return outcome,
                () = &mut threshold, if !flagged => {
                    flagged = true;
                    self.flag_slow(generation);
                }
            }
        }
    }

    fn flag_slow(&self, generation: u64) {
        let mut first = false;
        let committed = self.commit(Some(generation), |inner| {
            first = !inner.slow_notified;
            inner.slow = true;
            inner.slow_notified = true;
        });
        if committed && first {
            self.shared.context.notifier.notify(Notice::SlowConnection {
                resource: self.resource_name().to_string(),
            });
        }
    }

    fn settle_rows(&self, generation: u64, rows: Vec<Value>) {
        let items = match self.shared.source.decode_rows(rows) {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "rows failed to decode");
                self.settle_error(generation, ErrorKind::Unclassified, err.to_string(), None);
                return;
            }
        };
        let role = self.shared.context.role;
        let mut loaded = 0;
        let mut visible = 0;
        let committed = self.commit(Some(generation), |inner| {
            loaded = items.len();
            inner.items = items.into_iter().filter(|item| role.admits(item)).collect();
            visible = inner.items.len();
            inner.rederive();
            inner.state = FetchState::Success;
            inner.slow = false;
            inner.in_flight = false;
        });
        if committed {
            info!(loaded, visible, %role, "collection loaded");
        }
    }

    fn settle_error(
        &self,
        generation: u64,
        kind: ErrorKind,
        message: String,
        notice: Option<Notice>,
    ) {
        let state = FetchState::Error {
            kind,
            message: message.clone(),
        };
        let committed = self.commit(Some(generation), |inner| {
            inner.state = state;
            inner.slow = false;
            inner.in_flight = false;
        });
        if committed {
            let notice = notice.unwrap_or_else(|| Notice::LoadFailed {
                resource: self.resource_name().to_string(),
                kind,
                message,
            });
            self.shared.context.notifier.notify(notice);
        }
    }

    /// Apply a mutation and publish, unless disposed or superseded
    fn commit<F>(&self, generation: Option<u64>, apply: F) -> bool
    where
        F: FnOnce(&mut Inner<T>),
    {
        let mut inner = self.shared.inner.lock();
        if self.shared.root.is_cancelled() {
            return false;
        }
        if generation.is_some_and(|g| g != inner.generation) {
            return false;
        }
        apply(&mut inner);
        self.shared.updates.send_replace(inner.snapshot());
        true
    }
}

/// Unwinds a load whose future was dropped before it settled
///
/// Restores the state the load started from, so the next `load` fetches
/// again. Settled, superseded and disposed loads are left alone.
struct AbandonGuard<'a, T: Record + Clone> {
    shared: &'a Shared<T>,
    generation: u64,
    previous: Option<FetchState>,
}

impl<T: Record + Clone> Drop for AbandonGuard<'_, T> {
    fn drop(&mut self) {
        let shared = self.shared;
        let mut inner = shared.inner.lock();
        if shared.root.is_cancelled() || !inner.in_flight || inner.generation != self.generation {
            return;
        }
        inner.load_token.cancel();
        inner.in_flight = false;
        inner.slow = false;
        inner.state = self.previous.take().unwrap_or_default();
        shared.updates.send_replace(inner.snapshot());
        debug!(resource = %shared.source.resource_name(), "load dropped before settling");
    }
}

impl<T> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for ListController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("source", &self.shared.source)
            .field("policy", &self.shared.policy)
            .field("disposed", &self.shared.root.is_cancelled())
            .finish_non_exhaustive()
    }
}
