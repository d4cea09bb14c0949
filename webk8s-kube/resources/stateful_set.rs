use k8s_openapi::api::apps::v1::StatefulSet;
use serde::Serialize;

/// Status summary of the `statefulset` kubernetes resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatefulSetSummary {
    pub ready_replicas: i32,
    pub replicas: i32,
    pub updated: i32,
    pub current: i32,
}

impl From<&StatefulSet> for StatefulSetSummary {
    fn from(stateful_set: &StatefulSet) -> Self {
        let status = stateful_set.status.as_ref();
        Self {
            ready_replicas: status.and_then(|s| s.ready_replicas).unwrap_or_default(),
            replicas: stateful_set.spec.as_ref().and_then(|s| s.replicas).unwrap_or_default(),
            updated: status.and_then(|s| s.updated_replicas).unwrap_or_default(),
            current: status.and_then(|s| s.current_replicas).unwrap_or_default(),
        }
    }
}
