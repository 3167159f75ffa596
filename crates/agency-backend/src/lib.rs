//! Agency backend clients
//!
//! The hosted backend is an opaque collaborator: given a resource name,
//! equality filters and an ordering it returns rows or a classified error.
//!
//! - [`CollectionClient`]: the async seam the list controller depends on
//! - [`RestClient`]: PostgREST-dialect HTTP client for the hosted backend
//! - [`InMemoryClient`]: in-process collections, loadable from a JSON fixture
//! - [`BackendError`] / [`ErrorKind`]: failures tagged permission-denied,
//!   transient or unclassified

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod client;
mod error;
mod memory;
mod query;
mod rest;

pub use client::CollectionClient;
pub use error::{classify_status, BackendError, ErrorKind};
pub use memory::InMemoryClient;
pub use query::{CollectionQuery, Order};
pub use rest::{RestClient, RestConfig};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
