//! Command implementations for kubectl-multi CLI

pub mod clusters;
pub mod config;
pub mod nodes;

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Settings;
use crate::k8s::client::KubeconfigConnector;

/// Effective options for one run, merged from flags and settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportOptions {
    pub kubeconfig: Option<PathBuf>,
    /// Hub context; `None` skips managed-cluster enumeration
    pub remote_context: Option<String>,
    pub timeout: Option<Duration>,
}

impl ReportOptions {
    /// Flags win over the settings file, which wins over built-in defaults.
    pub fn merge(
        settings: &Settings,
        kubeconfig: Option<PathBuf>,
        remote_context: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        let remote_context =
            remote_context.unwrap_or_else(|| settings.defaults.remote_context.clone());

        Self {
            kubeconfig: kubeconfig
                .or_else(|| settings.defaults.kubeconfig.as_ref().map(PathBuf::from)),
            remote_context: Some(remote_context).filter(|c| !c.is_empty()),
            timeout: timeout_secs
                .map(Duration::from_secs)
                .or_else(|| settings.defaults.timeout()),
        }
    }

    pub fn connector(&self) -> KubeconfigConnector {
        KubeconfigConnector::new(self.kubeconfig.clone(), self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_uses_settings_defaults() {
        let options = ReportOptions::merge(&Settings::default(), None, None, None);
        assert_eq!(options.remote_context.as_deref(), Some("its1"));
        assert_eq!(options.kubeconfig, None);
        assert_eq!(options.timeout, None);
    }

    #[test]
    fn test_flags_override_settings() {
        let mut settings = Settings::default();
        settings.defaults.kubeconfig = Some("/from/settings".to_string());
        settings.defaults.timeout_secs = Some(30);

        let options = ReportOptions::merge(
            &settings,
            Some(PathBuf::from("/from/flag")),
            Some("hub".to_string()),
            Some(2),
        );
        assert_eq!(options.kubeconfig, Some(PathBuf::from("/from/flag")));
        assert_eq!(options.remote_context.as_deref(), Some("hub"));
        assert_eq!(options.timeout, Some(Duration::from_secs(2)));

        let options = ReportOptions::merge(&settings, None, None, None);
        assert_eq!(options.kubeconfig, Some(PathBuf::from("/from/settings")));
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_empty_remote_context_disables_hub() {
        let options = ReportOptions::merge(&Settings::default(), None, Some(String::new()), None);
        assert_eq!(options.remote_context, None);
    }
}
