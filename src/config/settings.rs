//! Configuration file support for kubectl-multi

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub colors: Colors,
}

/// Default values for flags not given on the command line
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Defaults {
    /// Kubeconfig context of the hub hosting ManagedCluster resources.
    /// An empty string disables remote enumeration.
    #[serde(default = "default_remote_context")]
    pub remote_context: String,

    /// Optional kubeconfig path. If not set, `$KUBECONFIG` and then
    /// `~/.kube/config` are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,

    /// Optional per-call API timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Color settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Colors {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_remote_context() -> String {
    "its1".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            remote_context: default_remote_context(),
            kubeconfig: None,
            timeout_secs: None,
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Defaults {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Settings {
    /// Load settings from file or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::find_config_file() else {
            return Self::default();
        };

        match Self::load_from_file(&path) {
            Ok(settings) => {
                crate::log_debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                crate::log_warn!("Ignoring config file: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .kubectl-multi.toml in current directory
    /// 2. ~/.config/kubectl-multi/config.toml (XDG config directory)
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(".kubectl-multi.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        Self::user_config_path().filter(|p| p.exists())
    }

    /// Per-user config file location, whether or not it exists
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kubectl-multi").join("config.toml"))
    }

    /// Save settings to file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example config file content
    pub fn example_config() -> String {
        r#"# kubectl-multi configuration file
# Place this file at ~/.config/kubectl-multi/config.toml or .kubectl-multi.toml in your project

[defaults]
# Hub context hosting ManagedCluster resources ("" disables remote clusters)
remote_context = "its1"
# kubeconfig = "/path/to/kubeconfig"  # Optional: defaults to $KUBECONFIG, then ~/.kube/config
# timeout_secs = 10  # Optional: per-call API timeout

[colors]
enabled = true
"#
        .to_string()
    }
}
