use k8s_openapi::api::core::v1::{Node, Pod};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::api::ListParams;
use kube::{Api, Client, ResourceExt};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::ClusterError;
use crate::resources::{is_ready, node_role};

/// Detailed view of a single node together with pods scheduled on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetail {
    pub name: String,
    pub ready: bool,
    pub role: &'static str,
    pub labels: BTreeMap<String, String>,
    pub capacity: BTreeMap<String, String>,
    pub allocatable: BTreeMap<String, String>,
    pub pods: Vec<NodePod>,
}

/// Pod scheduled on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePod {
    pub name: String,
    pub namespace: String,
    pub phase: String,
}

impl NodeDetail {
    fn new(node: &Node, pods: &[Pod]) -> Self {
        let status = node.status.as_ref();
        Self {
            name: node.name_any(),
            ready: is_ready(node),
            role: node_role(node),
            labels: node.labels().clone(),
            capacity: quantities(status.and_then(|s| s.capacity.as_ref())),
            allocatable: quantities(status.and_then(|s| s.allocatable.as_ref())),
            pods: pods
                .iter()
                .map(|p| NodePod {
                    name: p.name_any(),
                    namespace: p.namespace().unwrap_or_default(),
                    phase: p.status.as_ref().and_then(|s| s.phase.clone()).unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Fetches node `name` and pods scheduled on it.
pub async fn node_detail(client: Client, name: &str) -> Result<NodeDetail, ClusterError> {
    let node = Api::<Node>::all(client.clone()).get(name).await?;
    let params = ListParams::default().fields(&format!("spec.nodeName={name}"));
    let pods = Api::<Pod>::all(client).list(&params).await?;

    Ok(NodeDetail::new(&node, &pods.items))
}

fn quantities(map: Option<&BTreeMap<String, Quantity>>) -> BTreeMap<String, String> {
    map.map(|m| m.iter().map(|(k, v)| (k.clone(), v.0.clone())).collect())
        .unwrap_or_default()
}
