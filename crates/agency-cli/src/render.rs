//! Plain-text rendering of list snapshots

use agency_list::{FetchState, ListSnapshot};
use agency_model::Record;
use std::io::{self, Write};

const TITLE_WIDTH: usize = 44;

pub(crate) fn write_table<T: Record>(
    out: &mut dyn Write,
    snapshot: &ListSnapshot<T>,
) -> io::Result<()> {
    if let FetchState::Error { kind, message } = &snapshot.state {
        writeln!(out, "error ({kind}): {message}")?;
        if snapshot.total == 0 {
            return Ok(());
        }
        writeln!(out, "showing previously loaded items")?;
    }

    if snapshot.total == 0 {
        return writeln!(out, "nothing to show");
    }
    if snapshot.filtered == 0 {
        return writeln!(out, "no items match ({} loaded)", snapshot.total);
    }

    writeln!(out, "{:<TITLE_WIDTH$}  {:<10}  CREATED", "TITLE", "STATUS")?;
    for item in &snapshot.items {
        let created = item
            .created_at()
            .map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d").to_string());
        writeln!(
            out,
            "{:<TITLE_WIDTH$}  {:<10}  {created}",
            truncate(item.title(), TITLE_WIDTH),
            item.status(),
        )?;
    }

    let page = &snapshot.page;
    writeln!(
        out,
        "page {}/{}, items {}-{} of {} matching ({} loaded)",
        page.page,
        page.page_count,
        page.start + 1,
        page.end,
        snapshot.filtered,
        snapshot.total,
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Überlange Überschrift", 10), "Überlange…");
    }
}
