//! Cross-cluster node report

use anyhow::Result;
use k8s_openapi::chrono::{DateTime, Utc};
use std::io::{self, Write};

use crate::commands::ReportOptions;
use crate::k8s::client::Connector;
use crate::k8s::fleet::{self, ClusterNodes, Fleet};
use crate::k8s::nodes::{self, NodeRow};
use crate::utils::table::ReportWriter;

/// STATUS shown on the local cluster's row once its API has answered
pub const LOCAL_CLUSTER_STATUS: &str = "True";

/// Handle the nodes command against the real kubeconfig
pub async fn run(options: &ReportOptions) -> Result<()> {
    let connector = options.connector();
    report(
        &connector,
        options.remote_context.as_deref(),
        Utc::now(),
        io::stdout().lock(),
        &mut io::stderr(),
    )
    .await
}

/// Age of the oldest node, standing in for the local cluster's age
fn oldest_age(rows: &[NodeRow]) -> Option<String> {
    rows.iter()
        .filter_map(|r| r.age_seconds)
        .max()
        .map(nodes::format_age)
}

/// Print the local cluster's nodes, then every managed cluster registered on
/// `hub_context` with its nodes.
///
/// Failing to reach the local cluster is fatal. Problems with the hub or
/// with individual managed clusters become `warning:` lines on `diag`.
pub async fn report<C, W, D>(
    connector: &C,
    hub_context: Option<&str>,
    now: DateTime<Utc>,
    out: W,
    diag: &mut D,
) -> Result<()>
where
    C: Connector,
    W: Write,
    D: Write,
{
    let (local, client) = connector.connect_nodes(None).await?;
    let rows = nodes::list_nodes(&client, &local, now).await?;
    let age = match oldest_age(&rows) {
        Some(age) => age,
        None => nodes::cluster_age(&client, &local, now).await,
    };

    let mut table = ReportWriter::new(out);
    table.render_header()?;
    table.render_separator()?;
    table.render_cluster(&local, &local, LOCAL_CLUSTER_STATUS, &age)?;
    for row in &rows {
        table.render_node(row)?;
    }

    let Some(hub) = hub_context else {
        return Ok(());
    };

    let clusters = match fleet::hub_clusters(connector, hub).await {
        Ok(clusters) => clusters,
        Err(err) => {
            writeln!(diag, "warning: {}", err)?;
            return Ok(());
        }
    };

    Fleet::new(connector, now)
        .visit(&local, clusters, |report| -> Result<()> {
            let cluster = &report.cluster;
            table.render_cluster(hub, &cluster.name, &cluster.available, &cluster.age(now))?;
            match &report.nodes {
                ClusterNodes::Listed(rows) => {
                    for row in rows {
                        table.render_node(row)?;
                    }
                }
                ClusterNodes::Unreachable(err) => writeln!(diag, "warning: {}", err)?,
            }
            Ok(())
        })
        .await
}
