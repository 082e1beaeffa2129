//! Node reporting: per-node readiness, role, age and kubelet version

use k8s_openapi::api::core::v1::Node;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use k8s_openapi::chrono::{DateTime, Utc};

use crate::k8s::client::NodeSource;
use crate::utils::FleetError;

/// Well-known label prefix carrying a node's role
pub const NODE_ROLE_PREFIX: &str = "node-role.kubernetes.io/";

/// Role reported when a node carries no role label
pub const NO_ROLE: &str = "<none>";

/// Readiness reported when a node has no Ready condition
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Cluster age reported when no creation time can be read
pub const UNKNOWN_AGE: &str = "Unknown";

/// One report line describing a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub cluster: String,
    pub name: String,
    pub status: String,
    pub roles: String,
    pub age: String,
    /// Whole seconds since creation, `None` when the timestamp is missing
    pub age_seconds: Option<i64>,
    pub version: String,
}

/// List every node reachable through `source` and derive its row.
pub async fn list_nodes<S: NodeSource>(
    source: &S,
    cluster: &str,
    now: DateTime<Utc>,
) -> Result<Vec<NodeRow>, FleetError> {
    crate::log_debug!("Listing nodes in cluster {}", cluster);

    let nodes = source
        .list_nodes()
        .await
        .map_err(|source| FleetError::ClusterUnreachable {
            cluster: cluster.to_string(),
            source,
        })?;

    crate::log_info!("Cluster {}: {} node(s)", cluster, nodes.len());
    Ok(nodes.iter().map(|node| node_row(node, cluster, now)).collect())
}

/// Age of the cluster behind `source`, taken from its system namespace.
/// Errors are logged and reported as [`UNKNOWN_AGE`].
pub async fn cluster_age<S: NodeSource>(source: &S, cluster: &str, now: DateTime<Utc>) -> String {
    match source.cluster_created().await {
        Ok(Some(created)) => format_age(elapsed_seconds(&created, now)),
        Ok(None) => UNKNOWN_AGE.to_string(),
        Err(err) => {
            crate::log_debug!("Could not read creation time of cluster {}: {}", cluster, err);
            UNKNOWN_AGE.to_string()
        }
    }
}

pub fn node_row(node: &Node, cluster: &str, now: DateTime<Utc>) -> NodeRow {
    let age_seconds = node
        .metadata
        .creation_timestamp
        .as_ref()
        .map(|created| elapsed_seconds(created, now));

    NodeRow {
        cluster: cluster.to_string(),
        name: node.metadata.name.clone().unwrap_or_default(),
        status: readiness(node),
        roles: role(node),
        age: age_seconds.map_or_else(|| "-".to_string(), format_age),
        age_seconds,
        version: kubelet_version(node),
    }
}

/// Status of the `Ready` condition, or "Unknown" when there is none
pub fn readiness(node: &Node) -> String {
    node.status
        .as_ref()
        .and_then(|status| status.conditions.as_ref())
        .and_then(|conditions| conditions.iter().find(|c| c.type_ == "Ready"))
        .map(|c| c.status.clone())
        .unwrap_or_else(|| UNKNOWN_STATUS.to_string())
}

/// Suffix of the first `node-role.kubernetes.io/<role>` label.
///
/// Labels are a sorted map, so with several role labels the lexicographically
/// smallest key wins.
pub fn role(node: &Node) -> String {
    node.metadata
        .labels
        .iter()
        .flatten()
        .filter_map(|(key, _)| key.strip_prefix(NODE_ROLE_PREFIX))
        .find(|suffix| !suffix.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_ROLE.to_string())
}

pub fn kubelet_version(node: &Node) -> String {
    node.status
        .as_ref()
        .and_then(|status| status.node_info.as_ref())
        .map(|info| info.kubelet_version.clone())
        .unwrap_or_default()
}

/// Elapsed time since `created`, rounded to whole seconds. Clock skew that
/// puts creation in the future yields zero.
pub fn elapsed_seconds(created: &Time, now: DateTime<Utc>) -> i64 {
    let millis = now.signed_duration_since(created.0).num_milliseconds();
    ((millis + 500).div_euclid(1000)).max(0)
}

/// Render whole seconds as `1h2m3s`; hours are never folded into days.
pub fn format_age(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
