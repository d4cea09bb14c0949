use k8s_openapi::api::core::v1::Pod;
use serde::Serialize;

/// Status summary of the `pod` kubernetes resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSummary {
    pub phase: String,
    pub ready: String,
    pub restarts: i64,
    pub node_name: String,
    pub reason: String,
}

impl From<&Pod> for PodSummary {
    fn from(pod: &Pod) -> Self {
        Self {
            phase: pod.status.as_ref().and_then(|s| s.phase.clone()).unwrap_or_default(),
            ready: ready_ratio(pod),
            restarts: restart_count(pod),
            node_name: pod.spec.as_ref().and_then(|s| s.node_name.clone()).unwrap_or_default(),
            reason: waiting_reason(pod),
        }
    }
}

/// Returns `ready/total` string, where `total` is the number of containers declared in the pod spec.
pub fn ready_ratio(pod: &Pod) -> String {
    let total = pod.spec.as_ref().map(|s| s.containers.len()).unwrap_or_default();
    let ready = pod
        .status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| statuses.iter().filter(|s| s.ready).count())
        .unwrap_or_default();

    format!("{ready}/{total}")
}

/// Returns sum of restart counters of all pod containers.
pub fn restart_count(pod: &Pod) -> i64 {
    pod.status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| statuses.iter().map(|s| i64::from(s.restart_count)).sum())
        .unwrap_or_default()
}

/// Returns first non-empty waiting reason, scanning containers in the pod spec order.
pub fn waiting_reason(pod: &Pod) -> String {
    let Some(statuses) = pod.status.as_ref().and_then(|s| s.container_statuses.as_ref()) else {
        return String::new();
    };

    let reason_of = |name: &str| {
        statuses
            .iter()
            .filter(|s| s.name == name)
            .filter_map(|s| s.state.as_ref()?.waiting.as_ref()?.reason.as_deref())
            .find(|r| !r.is_empty())
    };

    pod.spec
        .iter()
        .flat_map(|s| s.containers.iter())
        .find_map(|c| reason_of(&c.name))
        .unwrap_or_default()
        .to_owned()
}
