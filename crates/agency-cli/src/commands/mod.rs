//! Subcommand implementations

mod content;
mod list;
mod orphans;

use crate::cli::Invocation;
use crate::config::AgencyConfig;
use agency_backend::{CollectionClient, InMemoryClient, RestClient};
use anyhow::Context;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub use content::{reading_time, slug};
pub use list::list;
pub use orphans::orphans;

/// How a command ended, beyond hard errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Command did its job
    Success,
    /// The collection could not be loaded
    LoadFailed,
}

impl Status {
    /// Process exit code
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::LoadFailed => 1,
        }
    }
}

/// Run a parsed invocation
///
/// # Errors
/// Configuration, fixture and I/O problems; the binary maps these to exit
/// code 2
pub async fn run(
    invocation: &Invocation,
    config: &AgencyConfig,
    out: &mut dyn Write,
) -> anyhow::Result<Status> {
    match invocation {
        Invocation::List(args) => list(args, config, out).await,
        Invocation::Slug { title, existing } => slug(title, existing, out),
        Invocation::ReadingTime { file } => reading_time(file, out),
        Invocation::Orphans { fixture, json } => {
            orphans(fixture.as_deref(), *json, config, out).await
        }
    }
}

/// Backend for a command: a fixture file if given, else the REST backend
fn open_client(
    fixture: Option<&Path>,
    config: &AgencyConfig,
) -> anyhow::Result<Arc<dyn CollectionClient>> {
    if let Some(path) = fixture {
        let client = InMemoryClient::from_fixture_file(path)?;
        tracing::debug!(resources = ?client.resources(), "using fixture backend");
        return Ok(Arc::new(client));
    }
    let rest = config.rest_config()?.context(
        "no backend configured: set backend.url in agency.toml or AGENCY_BACKEND_URL, or pass --fixture",
    )?;
    Ok(Arc::new(RestClient::new(rest)?))
}
