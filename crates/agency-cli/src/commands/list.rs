use super::{open_client, Status};
use crate::cli::ListArgs;
use crate::config::AgencyConfig;
use crate::render;
use agency_list::{ControllerContext, ListController, ListOptions, ListSource};
use agency_query::{FilterCriteria, Pagination};
use anyhow::Context;
use std::io::Write;

/// Load one collection through a list controller and print a page
///
/// A load failure is reported in the output and as [`Status::LoadFailed`];
/// bad arguments and missing configuration are errors.
pub async fn list(
    args: &ListArgs,
    config: &AgencyConfig,
    out: &mut dyn Write,
) -> anyhow::Result<Status> {
    let mut criteria = FilterCriteria::new().with_sort(args.sort);
    if let Some(search) = &args.search {
        criteria = criteria.with_search(search.clone());
    }
    for expr in &args.filters {
        criteria
            .push_filter_expr(expr)
            .with_context(|| format!("invalid --filter '{expr}'"))?;
    }
    let page_size = args.page_size.unwrap_or(config.list.page_size);
    let pagination = Pagination::new(args.page, page_size).context("invalid --page-size")?;

    let client = open_client(args.fixture.as_deref(), config)?;
    let controller = ListController::new(
        client,
        ListSource::dynamic(args.kind),
        ListOptions::new()
            .with_policy(config.retry)
            .with_pagination(pagination)
            .with_criteria(criteria),
        ControllerContext::new(args.role),
    );

    let state = controller.load().await;
    let snapshot = controller.snapshot();
    controller.dispose();
    tracing::info!(kind = %args.kind, %state, shown = snapshot.items.len(), "list finished");

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &snapshot)?;
        writeln!(out)?;
    } else {
        render::write_table(out, &snapshot)?;
    }

    Ok(if state.is_error() {
        Status::LoadFailed
    } else {
        Status::Success
    })
}
