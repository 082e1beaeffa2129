//! Kubeconfig loading and context resolution

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Config;
use std::path::Path;
use std::time::Duration;

use crate::utils::FleetError;

/// Resolved connection settings for one cluster
#[derive(Debug, Clone)]
pub struct ClusterContext {
    pub name: String,
    pub config: Config,
}

fn location(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "default locations".to_string())
}

/// Read an explicit kubeconfig, or fall back to `$KUBECONFIG` then
/// `~/.kube/config`.
pub fn load_kubeconfig(path: Option<&Path>) -> Result<Kubeconfig, FleetError> {
    let loaded = match path {
        Some(p) => Kubeconfig::read_from(p),
        None => Kubeconfig::read(),
    };

    loaded.map_err(|e| FleetError::ConfigLoad {
        location: location(path),
        source: e.into(),
    })
}

/// Pick the context to use: the override when given (it must exist),
/// otherwise the kubeconfig's current-context.
pub fn select_context(
    kubeconfig: &Kubeconfig,
    context: Option<&str>,
    location: &str,
) -> Result<String, FleetError> {
    match context.filter(|c| !c.is_empty()) {
        Some(name) => {
            if kubeconfig.contexts.iter().any(|c| c.name == name) {
                Ok(name.to_string())
            } else {
                Err(FleetError::ContextNotFound {
                    context: name.to_string(),
                })
            }
        }
        None => kubeconfig
            .current_context
            .clone()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| FleetError::ConfigLoad {
                location: location.to_string(),
                source: anyhow::anyhow!("current-context is not set"),
            }),
    }
}

/// Build connection settings for `context` from an already-parsed kubeconfig
pub async fn resolve_from(
    kubeconfig: Kubeconfig,
    context: Option<&str>,
    timeout: Option<Duration>,
    location: &str,
) -> Result<ClusterContext, FleetError> {
    let name = select_context(&kubeconfig, context, location)?;

    let options = KubeConfigOptions {
        context: Some(name.clone()),
        ..Default::default()
    };
    let mut config = Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| FleetError::ConfigLoad {
            location: location.to_string(),
            source: anyhow::anyhow!("context {}: {}", name, e),
        })?;

    if let Some(timeout) = timeout {
        config.connect_timeout = Some(timeout);
        config.read_timeout = Some(timeout);
    }

    crate::log_debug!("Resolved context {} -> {}", name, config.cluster_url);
    Ok(ClusterContext { name, config })
}

/// Resolve a context from `path` (or the default kubeconfig) into
/// connection settings. Never writes the kubeconfig.
pub async fn resolve(
    path: Option<&Path>,
    context: Option<&str>,
    timeout: Option<Duration>,
) -> Result<ClusterContext, FleetError> {
    let kubeconfig = load_kubeconfig(path)?;
    resolve_from(kubeconfig, context, timeout, &location(path)).await
}
