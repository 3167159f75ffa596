use super::Status;
use agency_model::{unique_slug, word_count};
use anyhow::Context;
use std::io::Write;
use std::path::Path;

/// Print a slug for `title` that avoids `existing`
pub fn slug(title: &str, existing: &[String], out: &mut dyn Write) -> anyhow::Result<Status> {
    writeln!(out, "{}", unique_slug(title, existing))?;
    Ok(Status::Success)
}

/// Print the reading-time estimate of a markdown file
pub fn reading_time(file: &Path, out: &mut dyn Write) -> anyhow::Result<Status> {
    let markdown = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let minutes = agency_model::reading_time(&markdown);
    let words = word_count(&markdown);
    writeln!(out, "{minutes} min read ({words} words)")?;
    Ok(Status::Success)
}
