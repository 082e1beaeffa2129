//! kubectl-multi: node views across an Open Cluster Management fleet
//!
//! The local cluster is reported first, then every `ManagedCluster`
//! registered on a hub context, each visited through a kubeconfig context of
//! the same name.

pub mod commands;
pub mod config;
pub mod k8s;
pub mod utils;
