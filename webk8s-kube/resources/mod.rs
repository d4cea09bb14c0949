use k8s_openapi::NamespaceResourceScope;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{ConfigMap, Node, Pod, Secret, Service};
use kube::api::ListParams;
use kube::{Api, Client, Resource};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::debug;

use crate::utils::format_time;
use crate::{ClusterError, ResourceKind};

pub use self::config_map::ConfigMapSummary;
pub use self::cron_job::CronJobSummary;
pub use self::daemon_set::DaemonSetSummary;
pub use self::deployment::DeploymentSummary;
pub use self::job::JobSummary;
pub use self::node::{NodeSummary, internal_ip, is_ready, node_role};
pub use self::pod::{PodSummary, ready_ratio, restart_count, waiting_reason};
pub use self::replica_set::ReplicaSetSummary;
pub use self::secret::SecretSummary;
pub use self::service::ServiceSummary;
pub use self::stateful_set::StatefulSetSummary;

mod config_map;
mod cron_job;
mod daemon_set;
mod deployment;
mod job;
mod node;
mod pod;
mod replica_set;
mod secret;
mod service;
mod stateful_set;

#[cfg(test)]
#[path = "./resources.tests.rs"]
mod resources_tests;

/// Uniform projection of a single kubernetes object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRow {
    pub name: String,
    pub namespace: String,
    pub creation_timestamp: String,
    pub labels: BTreeMap<String, String>,
    pub status: ResourceStatus,
}

impl ResourceRow {
    /// Creates new [`ResourceRow`] instance from the kubernetes `object`.
    pub fn new<K>(object: &K) -> Self
    where
        K: Resource,
        for<'a> &'a K: Into<ResourceStatus>,
    {
        let meta = object.meta();
        Self {
            name: meta.name.clone().unwrap_or_default(),
            namespace: meta.namespace.clone().unwrap_or_default(),
            creation_timestamp: format_time(meta.creation_timestamp.as_ref()),
            labels: meta.labels.clone().unwrap_or_default(),
            status: object.into(),
        }
    }
}

/// Kind-specific status summary of a [`ResourceRow`].\
/// **Note** that it is serialized as a plain object, the kind is known from the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceStatus {
    Node(NodeSummary),
    Pod(PodSummary),
    Service(ServiceSummary),
    ConfigMap(ConfigMapSummary),
    Secret(SecretSummary),
    Deployment(DeploymentSummary),
    ReplicaSet(ReplicaSetSummary),
    StatefulSet(StatefulSetSummary),
    DaemonSet(DaemonSetSummary),
    Job(JobSummary),
    CronJob(CronJobSummary),
}

macro_rules! impl_status_from {
    ($($kind:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<&$kind> for ResourceStatus {
                fn from(object: &$kind) -> Self {
                    ResourceStatus::$variant(object.into())
                }
            }
        )*
    };
}

impl_status_from!(
    Node => Node,
    Pod => Pod,
    Service => Service,
    ConfigMap => ConfigMap,
    Secret => Secret,
    Deployment => Deployment,
    ReplicaSet => ReplicaSet,
    StatefulSet => StatefulSet,
    DaemonSet => DaemonSet,
    Job => Job,
    CronJob => CronJob,
);

/// Lists objects of the `kind` (matched case-insensitively) in the `namespace`.\
/// **Note** that empty `namespace` means all namespaces, it is ignored for cluster-scoped kinds.
pub async fn list(client: Client, namespace: &str, kind: &str) -> Result<Vec<ResourceRow>, ClusterError> {
    list_kind(client, namespace, kind.parse()?).await
}

/// Lists objects of the `kind` in the `namespace` and projects them to [`ResourceRow`]s.
pub async fn list_kind(client: Client, namespace: &str, kind: ResourceKind) -> Result<Vec<ResourceRow>, ClusterError> {
    debug!("listing {} in namespace '{}'", kind, namespace);

    match kind {
        ResourceKind::Nodes => list_rows::<Node>(Api::all(client)).await,
        ResourceKind::Pods => list_rows::<Pod>(scoped_api(client, namespace)).await,
        ResourceKind::Services => list_rows::<Service>(scoped_api(client, namespace)).await,
        ResourceKind::ConfigMaps => list_rows::<ConfigMap>(scoped_api(client, namespace)).await,
        ResourceKind::Secrets => list_rows::<Secret>(scoped_api(client, namespace)).await,
        ResourceKind::Deployments => list_rows::<Deployment>(scoped_api(client, namespace)).await,
        ResourceKind::ReplicaSets => list_rows::<ReplicaSet>(scoped_api(client, namespace)).await,
        ResourceKind::StatefulSets => list_rows::<StatefulSet>(scoped_api(client, namespace)).await,
        ResourceKind::DaemonSets => list_rows::<DaemonSet>(scoped_api(client, namespace)).await,
        ResourceKind::Jobs => list_rows::<Job>(scoped_api(client, namespace)).await,
        ResourceKind::CronJobs => list_rows::<CronJob>(scoped_api(client, namespace)).await,
    }
}

/// Returns [`Api`] for the `namespace`, or for all namespaces if `namespace` is empty.
pub fn scoped_api<K>(client: Client, namespace: &str) -> Api<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    <K as Resource>::DynamicType: Default,
{
    if namespace.is_empty() {
        Api::all(client)
    } else {
        Api::namespaced(client, namespace)
    }
}

async fn list_rows<K>(api: Api<K>) -> Result<Vec<ResourceRow>, ClusterError>
where
    K: Resource + Clone + DeserializeOwned + Debug,
    for<'a> &'a K: Into<ResourceStatus>,
{
    let list = api.list(&ListParams::default()).await?;
    Ok(list.items.iter().map(ResourceRow::new).collect())
}
