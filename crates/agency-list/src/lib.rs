//! Agency list controller
//!
//! One generic controller behind every content list: it fetches a named
//! collection through a [`CollectionClient`](agency_backend::CollectionClient),
//! retries transient failures with capped exponential backoff, and publishes
//! a filtered, sorted, paginated [`ListSnapshot`] whenever anything changes.
//!
//! # Example
//!
//! ```rust,ignore
//! use agency_list::{ControllerContext, ListController, ListOptions, ListSource};
//! use agency_model::Job;
//!
//! let controller = ListController::new(
//!     client,
//!     ListSource::<Job>::resource(),
//!     ListOptions::new(),
//!     ControllerContext::public(),
//! );
//! controller.load().await;
//! controller.set_criteria(FilterCriteria::new().with_filter("status", "open"));
//! let snapshot = controller.snapshot();
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod connectivity;
mod context;
mod controller;
mod retry;
mod snapshot;
mod source;
mod state;

pub use connectivity::{Connectivity, ConnectivityMonitor};
pub use context::{ControllerContext, Notice, Notifier, TracingNotifier, ViewerRole};
pub use controller::{ListController, ListOptions};
pub use retry::{BackoffPolicy, RetryPolicy};
pub use snapshot::ListSnapshot;
pub use source::ListSource;
pub use state::FetchState;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
