//! Client construction and the listing capabilities the report depends on

use anyhow::Result;
use k8s_openapi::api::core::v1::{Namespace, Node};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::api::{Api, ListParams};
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use kube::Client;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::kubeconfig::{self, ClusterContext};
use crate::utils::FleetError;

/// Group/version/resource triple addressing an API collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl ResourceRef {
    pub fn new(group: &str, version: &str, resource: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            resource: resource.to_string(),
        }
    }

    fn api_resource(&self) -> ApiResource {
        // Kind is not needed to build list URLs
        let gvk = GroupVersionKind::gvk(&self.group, &self.version, "");
        ApiResource::from_gvk_with_plural(&gvk, &self.resource)
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}/{}", self.resource, self.group, self.version)
    }
}

/// Namespace every cluster creates at bootstrap
pub const SYSTEM_NAMESPACE: &str = "kube-system";

/// Cluster-scoped node listing
#[allow(async_fn_in_trait)]
pub trait NodeSource {
    async fn list_nodes(&self) -> Result<Vec<Node>>;

    /// Creation time of the cluster itself, read from [`SYSTEM_NAMESPACE`]
    async fn cluster_created(&self) -> Result<Option<Time>>;
}

/// Schema-agnostic listing of arbitrary resources
#[allow(async_fn_in_trait)]
pub trait ResourceClient {
    async fn list_resources(
        &self,
        resource: &ResourceRef,
        params: &ListParams,
    ) -> Result<Vec<DynamicObject>>;
}

/// Typed client bound to one cluster
#[derive(Clone)]
pub struct ClusterClient {
    client: Client,
}

impl NodeSource for ClusterClient {
    async fn list_nodes(&self) -> Result<Vec<Node>> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        Ok(nodes.list(&ListParams::default()).await?.items)
    }

    async fn cluster_created(&self) -> Result<Option<Time>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let system = namespaces.get(SYSTEM_NAMESPACE).await?;
        Ok(system.metadata.creation_timestamp)
    }
}

/// Dynamic client for resources not compiled into k8s-openapi
#[derive(Clone)]
pub struct GenericClient {
    client: Client,
}

impl ResourceClient for GenericClient {
    async fn list_resources(
        &self,
        resource: &ResourceRef,
        params: &ListParams,
    ) -> Result<Vec<DynamicObject>> {
        let api: Api<DynamicObject> = Api::all_with(self.client.clone(), &resource.api_resource());
        Ok(api.list(params).await?.items)
    }
}

fn build_client(context: &ClusterContext) -> Result<Client, FleetError> {
    Client::try_from(context.config.clone()).map_err(|e| FleetError::Connection {
        context: context.name.clone(),
        source: e.into(),
    })
}

pub fn build_typed_client(context: &ClusterContext) -> Result<ClusterClient, FleetError> {
    Ok(ClusterClient {
        client: build_client(context)?,
    })
}

pub fn build_generic_client(context: &ClusterContext) -> Result<GenericClient, FleetError> {
    Ok(GenericClient {
        client: build_client(context)?,
    })
}

/// Turns a context name into ready-to-use clients
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Nodes: NodeSource;
    type Resources: ResourceClient;

    /// Node client for `context`, or the current context when `None`.
    /// Returns the resolved context name alongside the client.
    async fn connect_nodes(
        &self,
        context: Option<&str>,
    ) -> Result<(String, Self::Nodes), FleetError>;

    async fn connect_resources(&self, context: &str) -> Result<Self::Resources, FleetError>;
}

/// Connector backed by a kubeconfig file
#[derive(Debug, Clone, Default)]
pub struct KubeconfigConnector {
    /// Explicit kubeconfig; `None` uses standard discovery
    pub kubeconfig: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl KubeconfigConnector {
    pub fn new(kubeconfig: Option<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            kubeconfig,
            timeout,
        }
    }

    async fn resolve(&self, context: Option<&str>) -> Result<ClusterContext, FleetError> {
        kubeconfig::resolve(self.kubeconfig.as_deref(), context, self.timeout).await
    }
}

impl Connector for KubeconfigConnector {
    type Nodes = ClusterClient;
    type Resources = GenericClient;

    async fn connect_nodes(
        &self,
        context: Option<&str>,
    ) -> Result<(String, ClusterClient), FleetError> {
        let resolved = self.resolve(context).await?;
        let client = build_typed_client(&resolved)?;
        Ok((resolved.name, client))
    }

    async fn connect_resources(&self, context: &str) -> Result<GenericClient, FleetError> {
        let resolved = self.resolve(Some(context)).await?;
        build_generic_client(&resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::kubeconfig::tests::FIXTURE;
    use std::io::Write;

    #[test]
    fn test_resource_ref_url_parts() {
        let r = ResourceRef::new("cluster.open-cluster-management.io", "v1", "managedclusters");
        let ar = r.api_resource();
        assert_eq!(ar.group, "cluster.open-cluster-management.io");
        assert_eq!(ar.version, "v1");
        assert_eq!(ar.api_version, "cluster.open-cluster-management.io/v1");
        assert_eq!(ar.plural, "managedclusters");
        assert_eq!(
            r.to_string(),
            "managedclusters.cluster.open-cluster-management.io/v1"
        );
    }

    #[tokio::test]
    async fn test_connector_resolves_current_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let connector = KubeconfigConnector::new(Some(file.path().to_path_buf()), None);
        let (name, _client) = connector.connect_nodes(None).await.unwrap();
        assert_eq!(name, "kind-hub");
    }

    #[tokio::test]
    async fn test_connector_rejects_unknown_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let connector = KubeconfigConnector::new(Some(file.path().to_path_buf()), None);
        let err = connector.connect_resources("its9").await.err().unwrap();
        assert!(matches!(err, FleetError::ContextNotFound { ref context } if context == "its9"));
    }
}
