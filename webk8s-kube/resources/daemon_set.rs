use k8s_openapi::api::apps::v1::DaemonSet;
use serde::Serialize;

/// Status summary of the `daemonset` kubernetes resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetSummary {
    pub ready_replicas: i32,
    pub replicas: i32,
    pub current: i32,
    pub available: i32,
}

impl From<&DaemonSet> for DaemonSetSummary {
    fn from(daemon_set: &DaemonSet) -> Self {
        let Some(status) = daemon_set.status.as_ref() else {
            return Self::default();
        };

        Self {
            ready_replicas: status.number_ready,
            replicas: status.desired_number_scheduled,
            current: status.current_number_scheduled,
            available: status.number_available.unwrap_or_default(),
        }
    }
}
