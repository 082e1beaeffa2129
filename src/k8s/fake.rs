//! In-memory stand-ins for the API server used by unit tests

use anyhow::{Result, anyhow};
use k8s_openapi::api::core::v1::Node;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use k8s_openapi::chrono::{DateTime, Utc};
use kube::api::ListParams;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::k8s::client::{Connector, NodeSource, ResourceClient, ResourceRef};
use crate::utils::FleetError;

#[derive(Clone)]
pub struct FakeNodes {
    nodes: Result<Vec<Node>, String>,
    created: Option<DateTime<Utc>>,
}

impl NodeSource for FakeNodes {
    async fn list_nodes(&self) -> Result<Vec<Node>> {
        self.nodes.clone().map_err(|e| anyhow!(e))
    }

    async fn cluster_created(&self) -> Result<Option<Time>> {
        match self.created {
            Some(created) => Ok(Some(Time(created))),
            None => Err(anyhow!("namespaces \"kube-system\" not found")),
        }
    }
}

#[derive(Clone)]
pub struct FakeHub {
    items: Result<Vec<DynamicObject>, String>,
    requested: Rc<RefCell<Vec<ResourceRef>>>,
}

impl ResourceClient for FakeHub {
    async fn list_resources(
        &self,
        resource: &ResourceRef,
        _params: &ListParams,
    ) -> Result<Vec<DynamicObject>> {
        self.requested.borrow_mut().push(resource.clone());
        self.items.clone().map_err(|e| anyhow!(e))
    }
}

enum Endpoint {
    Nodes(Result<Vec<Node>, String>),
    Refused(String),
}

/// Fake kubeconfig plus clusters. Contexts that were never added are
/// reported as missing from the kubeconfig.
pub struct FakeFleet {
    current: String,
    endpoints: HashMap<String, Endpoint>,
    created: HashMap<String, DateTime<Utc>>,
    hub: Option<Result<Vec<DynamicObject>, String>>,
    /// Contexts passed to `connect_nodes`, in call order
    pub connected: RefCell<Vec<String>>,
    /// Resources listed through any hub client
    pub requested: Rc<RefCell<Vec<ResourceRef>>>,
}

impl FakeFleet {
    pub fn new(current: &str) -> Self {
        Self {
            current: current.to_string(),
            endpoints: HashMap::new(),
            created: HashMap::new(),
            hub: None,
            connected: RefCell::new(Vec::new()),
            requested: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn cluster(mut self, name: &str, nodes: Vec<Node>) -> Self {
        self.endpoints
            .insert(name.to_string(), Endpoint::Nodes(Ok(nodes)));
        self
    }

    /// Creation time reported for the cluster's system namespace
    pub fn created(mut self, name: &str, at: DateTime<Utc>) -> Self {
        self.created.insert(name.to_string(), at);
        self
    }

    /// Client builds, node listing fails
    pub fn unreachable(mut self, name: &str, error: &str) -> Self {
        self.endpoints
            .insert(name.to_string(), Endpoint::Nodes(Err(error.to_string())));
        self
    }

    /// Client construction itself fails
    pub fn refused(mut self, name: &str, error: &str) -> Self {
        self.endpoints
            .insert(name.to_string(), Endpoint::Refused(error.to_string()));
        self
    }

    pub fn hub(mut self, items: Vec<DynamicObject>) -> Self {
        self.hub = Some(Ok(items));
        self
    }

    pub fn hub_failing(mut self, error: &str) -> Self {
        self.hub = Some(Err(error.to_string()));
        self
    }
}

impl Connector for FakeFleet {
    type Nodes = FakeNodes;
    type Resources = FakeHub;

    async fn connect_nodes(
        &self,
        context: Option<&str>,
    ) -> Result<(String, FakeNodes), FleetError> {
        let name = context.unwrap_or(&self.current).to_string();
        self.connected.borrow_mut().push(name.clone());

        match self.endpoints.get(&name) {
            Some(Endpoint::Nodes(nodes)) => {
                let client = FakeNodes {
                    nodes: nodes.clone(),
                    created: self.created.get(&name).copied(),
                };
                Ok((name, client))
            }
            Some(Endpoint::Refused(error)) => Err(FleetError::Connection {
                context: name,
                source: anyhow!(error.clone()),
            }),
            None => Err(FleetError::ContextNotFound { context: name }),
        }
    }

    async fn connect_resources(&self, context: &str) -> Result<FakeHub, FleetError> {
        match &self.hub {
            Some(items) => Ok(FakeHub {
                items: items.clone(),
                requested: Rc::clone(&self.requested),
            }),
            None => Err(FleetError::ContextNotFound {
                context: context.to_string(),
            }),
        }
    }
}

/// ManagedCluster object as the hub would return it
pub fn managed_cluster(name: &str, created: DateTime<Utc>, available: Option<&str>) -> DynamicObject {
    let gvk = GroupVersionKind::gvk("cluster.open-cluster-management.io", "v1", "ManagedCluster");
    let resource = ApiResource::from_gvk_with_plural(&gvk, "managedclusters");

    let mut conditions = vec![json!({ "type": "HubAcceptedManagedCluster", "status": "True" })];
    conditions.extend(available.map(|status| {
        json!({
            "type": "ManagedClusterConditionAvailable",
            "status": status,
            "reason": "ManagedClusterAvailable",
        })
    }));

    let mut obj = DynamicObject::new(name, &resource).data(json!({
        "spec": { "hubAcceptsClient": true },
        "status": { "conditions": conditions },
    }));
    obj.metadata.creation_timestamp = Some(Time(created));
    obj
}
