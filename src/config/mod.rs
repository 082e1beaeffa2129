//! Configuration: the tool's own settings file and kubeconfig resolution

pub mod kubeconfig;
pub mod settings;

pub use kubeconfig::ClusterContext;
pub use settings::Settings;
