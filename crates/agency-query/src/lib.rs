//! Agency list queries
//!
//! Pure, stateless predicates that turn a loaded collection into the view a
//! screen shows:
//! - [`matches_search`]: case-insensitive substring search over searchable fields
//! - [`matches_filter`]: exact-match field filters with an `All` sentinel
//! - [`compare`]: total order for each [`SortKey`]
//! - [`derive_view`]: search AND filters, then a stable sort
//! - [`Pagination`]: fixed-size pages over the derived view
//!
//! Everything here is referentially transparent and cheap enough to run on
//! every keystroke.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod criteria;
mod error;
mod page;
mod predicate;
mod sort;
mod view;

pub use criteria::{FilterCriteria, FilterValue};
pub use error::QueryError;
pub use page::{PageBounds, Pagination, DEFAULT_PAGE_SIZE};
pub use predicate::{matches_all, matches_filter, matches_search, normalize_search};
pub use sort::{collate, compare, SortKey};
pub use view::{derive_indices, derive_view};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
