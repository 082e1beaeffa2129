//! Kubernetes operations

pub mod client;
pub mod fleet;
pub mod nodes;

#[cfg(test)]
pub(crate) mod fake;
