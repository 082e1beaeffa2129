//! Managed-cluster listing

use anyhow::{Result, bail};
use k8s_openapi::chrono::{DateTime, Utc};
use std::io::{self, Write};

use crate::commands::ReportOptions;
use crate::k8s::client::Connector;
use crate::k8s::fleet;
use crate::utils::table::ReportWriter;

/// Handle the clusters command
pub async fn run(options: &ReportOptions) -> Result<()> {
    let Some(hub) = options.remote_context.as_deref() else {
        bail!("no hub context configured; pass --remote-context <context>");
    };

    list(&options.connector(), hub, Utc::now(), io::stdout().lock()).await
}

/// Print one row per ManagedCluster registered on `hub`. Without a hub
/// listing there is nothing to show, so its failure is returned.
pub async fn list<C: Connector, W: Write>(
    connector: &C,
    hub: &str,
    now: DateTime<Utc>,
    out: W,
) -> Result<()> {
    let clusters = fleet::hub_clusters(connector, hub).await?;

    let mut table = ReportWriter::new(out);
    table.render_header()?;
    table.render_separator()?;
    for cluster in &clusters {
        table.render_cluster(hub, &cluster.name, &cluster.available, &cluster.age(now))?;
    }

    if clusters.is_empty() {
        crate::log_info!("No managed clusters registered on {}", hub);
    }
    Ok(())
}
