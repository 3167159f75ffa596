//! Concrete record types, one per backend collection

mod careers;
mod content;
mod media;
mod sales;

pub use careers::Job;
pub use content::{BlogPost, Faq, Project, Service};
pub use media::{find_orphans, MediaAsset};
pub use sales::{Proposal, Quote};
