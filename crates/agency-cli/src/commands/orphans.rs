use super::{open_client, Status};
use crate::config::AgencyConfig;
use agency_backend::{BackendError, CollectionClient, CollectionQuery};
use agency_model::{find_orphans, CollectionItem, MediaAsset, Record, Resource, ResourceKind};
use futures::future::try_join_all;
use std::io::Write;
use std::path::Path;

/// Collections whose records may embed media
const REFERENCING: [ResourceKind; 3] = [
    ResourceKind::BlogPost,
    ResourceKind::Project,
    ResourceKind::Service,
];

/// Print media assets nothing references
pub async fn orphans(
    fixture: Option<&Path>,
    json: bool,
    config: &AgencyConfig,
    out: &mut dyn Write,
) -> anyhow::Result<Status> {
    let client = open_client(fixture, config)?;

    let media_query = CollectionQuery::new(ResourceKind::Media.resource_name());
    let (media_rows, content) = futures::try_join!(
        async { client.fetch(&media_query).await.map_err(anyhow::Error::from) },
        try_join_all(REFERENCING.map(|kind| fetch_items(client.as_ref(), kind))),
    )?;

    let assets = media_rows
        .into_iter()
        .map(MediaAsset::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    let references: Vec<&str> = content
        .iter()
        .flatten()
        .flat_map(|item| item.media_references())
        .collect();
    let orphans = find_orphans(&assets, references);
    tracing::info!(assets = assets.len(), orphans = orphans.len(), "orphan scan finished");

    if json {
        serde_json::to_writer_pretty(&mut *out, &orphans)?;
        writeln!(out)?;
    } else {
        for asset in &orphans {
            writeln!(out, "{}\t{}", asset.title(), asset.storage_path)?;
        }
        writeln!(out, "{} of {} assets unreferenced", orphans.len(), assets.len())?;
    }
    Ok(Status::Success)
}

/// Fetch and decode one referencing collection; a collection the backend
/// does not serve counts as empty
async fn fetch_items(
    client: &dyn CollectionClient,
    kind: ResourceKind,
) -> anyhow::Result<Vec<CollectionItem>> {
    let rows = match client.fetch(&CollectionQuery::new(kind.resource_name())).await {
        Ok(rows) => rows,
        Err(BackendError::UnknownResource(resource)) => {
            tracing::debug!(%resource, "collection absent, skipping");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };
    let items = rows
        .into_iter()
        .map(|row| CollectionItem::from_row(kind, row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}
