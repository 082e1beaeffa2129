//! Error types with actionable suggestions

use colored::Colorize;
use std::io::Write;
use thiserror::Error;

/// Failures raised while resolving contexts, building clients or listing
/// resources across the fleet.
///
/// Whether a variant is fatal depends on where it happens: anything touching
/// the local context aborts the run, while the same error for a remote
/// managed cluster is reported and skipped.
#[derive(Error, Debug)]
pub enum FleetError {
    /// Kubeconfig missing, unreadable, or unusable
    #[error("failed to load kubeconfig from {location}: {source}")]
    ConfigLoad {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    /// Requested context is not declared in the kubeconfig
    #[error("context '{context}' not found in kubeconfig")]
    ContextNotFound { context: String },

    /// Client construction failed for a context
    #[error("failed to build client for context {context}: {source}")]
    Connection {
        context: String,
        #[source]
        source: anyhow::Error,
    },

    /// Node listing failed against an already-built client
    #[error("failed to list nodes in cluster {cluster}: {source}")]
    ClusterUnreachable {
        cluster: String,
        #[source]
        source: anyhow::Error,
    },

    /// The hub's managed-cluster listing failed
    #[error("could not list managedclusters from {context}: {source}")]
    HubListing {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

impl FleetError {
    /// Name of the context or cluster the error is about
    pub fn target(&self) -> &str {
        match self {
            Self::ConfigLoad { location, .. } => location,
            Self::ContextNotFound { context }
            | Self::Connection { context, .. }
            | Self::HubListing { context, .. } => context,
            Self::ClusterUnreachable { cluster, .. } => cluster,
        }
    }

    /// Hints shown under a fatal error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigLoad { .. } => vec![
                "Verify the kubeconfig file exists and is valid YAML".to_string(),
                "Set KUBECONFIG or pass --kubeconfig <path>".to_string(),
                "Check that current-context is set: kubectl config current-context"
                    .to_string(),
            ],
            Self::ContextNotFound { .. } => vec![
                "List available contexts with: kubectl config get-contexts".to_string(),
                "Managed cluster names must match kubeconfig context names".to_string(),
            ],
            Self::Connection { context, .. } => vec![
                format!("Check the credentials for context '{}'", context),
                "Exec-based auth plugins must be on your PATH".to_string(),
            ],
            Self::ClusterUnreachable { cluster, .. } => vec![
                format!("Check connectivity: kubectl --context {} get nodes", cluster),
                "Raise the per-call deadline with --timeout <secs>".to_string(),
                "Verify you are allowed to list nodes".to_string(),
            ],
            Self::HubListing { context, .. } => vec![
                format!(
                    "Check the hub: kubectl --context {} get managedclusters",
                    context
                ),
                "Use --remote-context to point at a different hub".to_string(),
            ],
        }
    }

    /// Write `error: <message>` followed by any suggestions
    pub fn display_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "error: {}", self)?;

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", "Suggestions:".yellow().bold())?;
            for suggestion in &suggestions {
                writeln!(w, "  {} {}", "→".blue(), suggestion)?;
            }
        }
        Ok(())
    }
}

/// Print a fatal error with suggestions to stderr and exit nonzero
pub fn display_error_and_exit(error: &FleetError) -> ! {
    crate::log_debug!("fatal error: {:?}", error);
    let _ = error.display_to(&mut std::io::stderr());
    std::process::exit(1);
}
