use k8s_openapi::api::core::v1::{Event, Pod};
use kube::api::ListParams;
use kube::{Api, Client, ResourceExt};
use serde::Serialize;

use crate::ClusterError;
use crate::resources::{ready_ratio, restart_count, waiting_reason};
use crate::utils::format_time;

/// Detailed view of a single pod.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodDetail {
    pub name: String,
    pub namespace: String,
    pub node: String,
    #[serde(rename = "podIP")]
    pub pod_ip: String,
    pub phase: String,
    pub reason: String,
    pub start_time: String,
    pub ready: String,
    pub restarts: i64,
    pub containers: Vec<ContainerInfo>,
}

/// Container declared in the pod spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerInfo {
    pub name: String,
    pub image: String,
}

/// Names of the pod containers and init containers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodContainers {
    pub containers: Vec<String>,
    pub init_containers: Vec<String>,
}

impl From<&Pod> for PodDetail {
    fn from(pod: &Pod) -> Self {
        let spec = pod.spec.as_ref();
        let status = pod.status.as_ref();
        Self {
            name: pod.name_any(),
            namespace: pod.namespace().unwrap_or_default(),
            node: spec.and_then(|s| s.node_name.clone()).unwrap_or_default(),
            pod_ip: status.and_then(|s| s.pod_ip.clone()).unwrap_or_default(),
            phase: status.and_then(|s| s.phase.clone()).unwrap_or_default(),
            reason: waiting_reason(pod),
            start_time: format_time(status.and_then(|s| s.start_time.as_ref())),
            ready: ready_ratio(pod),
            restarts: restart_count(pod),
            containers: spec
                .map(|s| {
                    s.containers
                        .iter()
                        .map(|c| ContainerInfo {
                            name: c.name.clone(),
                            image: c.image.clone().unwrap_or_default(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

impl From<&Pod> for PodContainers {
    fn from(pod: &Pod) -> Self {
        let Some(spec) = pod.spec.as_ref() else {
            return Self::default();
        };

        Self {
            containers: spec.containers.iter().map(|c| c.name.clone()).collect(),
            init_containers: spec
                .init_containers
                .iter()
                .flatten()
                .map(|c| c.name.clone())
                .collect(),
        }
    }
}

/// Fetches pod `name` from the `namespace` and returns its [`PodDetail`].
pub async fn pod_detail(client: Client, namespace: &str, name: &str) -> Result<PodDetail, ClusterError> {
    let pod = Api::<Pod>::namespaced(client, namespace).get(name).await?;
    Ok(PodDetail::from(&pod))
}

/// Fetches pod `name` from the `namespace` and returns names of its containers.
pub async fn pod_containers(client: Client, namespace: &str, name: &str) -> Result<PodContainers, ClusterError> {
    let pod = Api::<Pod>::namespaced(client, namespace).get(name).await?;
    Ok(PodContainers::from(&pod))
}

/// Returns events that involve object `name` in the `namespace`.
pub async fn pod_events(client: Client, namespace: &str, name: &str) -> Result<Vec<Event>, ClusterError> {
    let params = ListParams::default().fields(&format!("involvedObject.name={name}"));
    let list = Api::<Event>::namespaced(client, namespace).list(&params).await?;
    Ok(list.items)
}
