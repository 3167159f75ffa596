//! Agency content model
//!
//! Typed records for every collection the agency site and admin panel list:
//! blog posts, services, jobs, projects, proposals, quotes, FAQs and media.
//!
//! # Core Concepts
//!
//! - [`Record`]: the read-only view the list machinery needs from any item
//!   (id, title, status, timestamp, searchable and filterable fields)
//! - [`Resource`]: a record type bound to one backend collection
//! - [`CollectionItem`]: tagged union over all record types, for callers that
//!   pick the collection at runtime
//! - Content helpers: [`slugify`], [`unique_slug`], [`reading_time`],
//!   [`find_orphans`]
//!
//! # Example
//!
//! ```rust,ignore
//! use agency_model::{CollectionItem, Record, ResourceKind};
//!
//! let row = serde_json::json!({ "id": id, "title": "Designer", "status": "open" });
//! let item = CollectionItem::from_row(ResourceKind::Job, row)?;
//! assert_eq!(item.title(), "Designer");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod item;
mod reading;
mod record;
mod slug;
mod status;
mod timestamp;

pub mod resources;

pub use error::ModelError;
pub use item::{CollectionItem, ResourceKind};
pub use reading::{reading_time, word_count, WORDS_PER_MINUTE};
pub use record::{Record, Resource};
pub use resources::{
    find_orphans, BlogPost, Faq, Job, MediaAsset, Project, Proposal, Quote, Service,
};
pub use slug::{slugify, unique_slug};
pub use status::{JobStatus, ProposalStatus, PublishStatus, QuoteStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
