//! Managed-cluster enumeration across an Open Cluster Management hub
//!
//! The hub registers member clusters as `ManagedCluster` custom resources.
//! Each one is expected to have a kubeconfig context of the same name; the
//! enumerator connects to it and reports its nodes. A failure for one member
//! becomes [`ClusterNodes::Unreachable`] and the walk moves on.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use k8s_openapi::chrono::{DateTime, Utc};
use kube::api::ListParams;
use kube::core::DynamicObject;
use kube::ResourceExt;

use crate::k8s::client::{Connector, ResourceClient, ResourceRef};
use crate::k8s::nodes::{self, NodeRow, UNKNOWN_STATUS};
use crate::utils::FleetError;

pub const MANAGED_CLUSTER_GROUP: &str = "cluster.open-cluster-management.io";
pub const MANAGED_CLUSTER_VERSION: &str = "v1";
pub const MANAGED_CLUSTER_RESOURCE: &str = "managedclusters";

/// Condition the registration agent keeps current on each ManagedCluster
pub const AVAILABLE_CONDITION: &str = "ManagedClusterConditionAvailable";

pub fn managed_clusters() -> ResourceRef {
    ResourceRef::new(
        MANAGED_CLUSTER_GROUP,
        MANAGED_CLUSTER_VERSION,
        MANAGED_CLUSTER_RESOURCE,
    )
}

/// Read-only projection of a ManagedCluster resource
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedClusterRef {
    pub name: String,
    pub created: Option<Time>,
    /// Status of the Available condition; "Unknown" when not reported
    pub available: String,
}

impl ManagedClusterRef {
    pub fn from_object(obj: &DynamicObject) -> Self {
        let available = obj.data["status"]["conditions"]
            .as_array()
            .and_then(|conditions| {
                conditions
                    .iter()
                    .find(|c| c["type"].as_str() == Some(AVAILABLE_CONDITION))
            })
            .and_then(|c| c["status"].as_str())
            .unwrap_or(UNKNOWN_STATUS)
            .to_string();

        Self {
            name: obj.name_any(),
            created: obj.metadata.creation_timestamp.clone(),
            available,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> String {
        match &self.created {
            Some(created) => nodes::format_age(nodes::elapsed_seconds(created, now)),
            None => "-".to_string(),
        }
    }
}

/// Node listing outcome for one member cluster
#[derive(Debug)]
pub enum ClusterNodes {
    Listed(Vec<NodeRow>),
    Unreachable(FleetError),
}

#[derive(Debug)]
pub struct ClusterReport {
    pub cluster: ManagedClusterRef,
    pub nodes: ClusterNodes,
}

/// List the ManagedCluster resources registered on the hub, in API order.
pub async fn list_managed_clusters<R: ResourceClient>(
    hub: &R,
    hub_context: &str,
) -> Result<Vec<ManagedClusterRef>, FleetError> {
    let items = hub
        .list_resources(&managed_clusters(), &ListParams::default())
        .await
        .map_err(|source| FleetError::HubListing {
            context: hub_context.to_string(),
            source,
        })?;

    crate::log_info!("Hub {}: {} managed cluster(s)", hub_context, items.len());
    Ok(items.iter().map(ManagedClusterRef::from_object).collect())
}

/// Connect to the hub context and list its managed clusters. Any failure,
/// including building the hub client, is a [`FleetError::HubListing`].
pub async fn hub_clusters<C: Connector>(
    connector: &C,
    hub_context: &str,
) -> Result<Vec<ManagedClusterRef>, FleetError> {
    let hub = connector
        .connect_resources(hub_context)
        .await
        .map_err(|e| FleetError::HubListing {
            context: hub_context.to_string(),
            source: e.into(),
        })?;

    list_managed_clusters(&hub, hub_context).await
}

pub struct Fleet<'a, C> {
    connector: &'a C,
    now: DateTime<Utc>,
}

impl<'a, C: Connector> Fleet<'a, C> {
    pub fn new(connector: &'a C, now: DateTime<Utc>) -> Self {
        Self { connector, now }
    }

    /// Connect to one member cluster through its same-named context and
    /// list its nodes.
    pub async fn report_cluster(&self, cluster: ManagedClusterRef) -> ClusterReport {
        let nodes = match self.cluster_nodes(&cluster.name).await {
            Ok(rows) => ClusterNodes::Listed(rows),
            Err(err) => {
                crate::log_debug!("Skipping cluster {}: {}", err.target(), err);
                ClusterNodes::Unreachable(err)
            }
        };
        ClusterReport { cluster, nodes }
    }

    async fn cluster_nodes(&self, name: &str) -> Result<Vec<NodeRow>, FleetError> {
        let (_, client) = self.connector.connect_nodes(Some(name)).await?;
        nodes::list_nodes(&client, name, self.now).await
    }

    /// Visit every cluster except `local_context`, in order, handing each
    /// report to `on_cluster` as soon as it is ready.
    pub async fn visit<F, E>(
        &self,
        local_context: &str,
        clusters: Vec<ManagedClusterRef>,
        mut on_cluster: F,
    ) -> Result<(), E>
    where
        F: FnMut(ClusterReport) -> Result<(), E>,
    {
        for cluster in clusters {
            if cluster.name == local_context {
                crate::log_debug!("Skipping local cluster {} in hub listing", cluster.name);
                continue;
            }
            on_cluster(self.report_cluster(cluster).await)?;
        }
        Ok(())
    }
}
