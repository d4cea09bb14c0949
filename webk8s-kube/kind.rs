use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

use crate::ClusterError;

#[cfg(test)]
#[path = "./kind.tests.rs"]
mod kind_tests;

pub const NODES: &str = "nodes";
pub const PODS: &str = "pods";
pub const SERVICES: &str = "services";
pub const CONFIG_MAPS: &str = "configmaps";
pub const SECRETS: &str = "secrets";
pub const DEPLOYMENTS: &str = "deployments";
pub const REPLICA_SETS: &str = "replicasets";
pub const STATEFUL_SETS: &str = "statefulsets";
pub const DAEMON_SETS: &str = "daemonsets";
pub const JOBS: &str = "jobs";
pub const CRON_JOBS: &str = "cronjobs";

/// All supported resource kinds in the order they are presented to the user.
pub const RESOURCE_KINDS: [ResourceKind; 11] = [
    ResourceKind::Pods,
    ResourceKind::Nodes,
    ResourceKind::Deployments,
    ResourceKind::ReplicaSets,
    ResourceKind::StatefulSets,
    ResourceKind::DaemonSets,
    ResourceKind::Jobs,
    ResourceKind::CronJobs,
    ResourceKind::ConfigMaps,
    ResourceKind::Secrets,
    ResourceKind::Services,
];

/// Kubernetes resource kind that can be listed as [`crate::ResourceRow`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Nodes,
    Pods,
    Services,
    ConfigMaps,
    Secrets,
    Deployments,
    ReplicaSets,
    StatefulSets,
    DaemonSets,
    Jobs,
    CronJobs,
}

impl ResourceKind {
    /// Returns plural key used to request this kind.
    pub fn key(&self) -> &'static str {
        match self {
            ResourceKind::Nodes => NODES,
            ResourceKind::Pods => PODS,
            ResourceKind::Services => SERVICES,
            ResourceKind::ConfigMaps => CONFIG_MAPS,
            ResourceKind::Secrets => SECRETS,
            ResourceKind::Deployments => DEPLOYMENTS,
            ResourceKind::ReplicaSets => REPLICA_SETS,
            ResourceKind::StatefulSets => STATEFUL_SETS,
            ResourceKind::DaemonSets => DAEMON_SETS,
            ResourceKind::Jobs => JOBS,
            ResourceKind::CronJobs => CRON_JOBS,
        }
    }

    /// Returns human-readable label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Nodes => "Nodes",
            ResourceKind::Pods => "Pods",
            ResourceKind::Services => "Services",
            ResourceKind::ConfigMaps => "ConfigMaps",
            ResourceKind::Secrets => "Secrets",
            ResourceKind::Deployments => "Deployments",
            ResourceKind::ReplicaSets => "ReplicaSets",
            ResourceKind::StatefulSets => "StatefulSets",
            ResourceKind::DaemonSets => "DaemonSets",
            ResourceKind::Jobs => "Jobs",
            ResourceKind::CronJobs => "CronJobs",
        }
    }

    /// Returns `true` if objects of this kind live inside a namespace.
    pub fn is_namespaced(&self) -> bool {
        *self != ResourceKind::Nodes
    }
}

impl FromStr for ResourceKind {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RESOURCE_KINDS
            .iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ClusterError::UnsupportedKind(s.to_ascii_lowercase()))
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for ResourceKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ResourceKind", 2)?;
        state.serialize_field("key", self.key())?;
        state.serialize_field("label", self.label())?;
        state.end()
    }
}
