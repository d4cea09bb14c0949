use k8s_openapi::api::apps::v1::ReplicaSet;
use serde::Serialize;

/// Status summary of the `replicaset` kubernetes resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSetSummary {
    pub ready_replicas: i32,
    pub replicas: i32,
    pub available: i32,
}

impl From<&ReplicaSet> for ReplicaSetSummary {
    fn from(replica_set: &ReplicaSet) -> Self {
        let status = replica_set.status.as_ref();
        Self {
            ready_replicas: status.and_then(|s| s.ready_replicas).unwrap_or_default(),
            replicas: replica_set.spec.as_ref().and_then(|s| s.replicas).unwrap_or_default(),
            available: status.and_then(|s| s.available_replicas).unwrap_or_default(),
        }
    }
}
