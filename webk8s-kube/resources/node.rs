use k8s_openapi::api::core::v1::Node;
use serde::Serialize;

const MASTER_LABEL: &str = "node-role.kubernetes.io/master";
const CONTROL_PLANE_LABEL: &str = "node-role.kubernetes.io/control-plane";

/// Status summary of the `node` kubernetes resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub ready: &'static str,
    pub role: &'static str,
    pub version: String,
    pub ip: String,
    pub os: String,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        let info = node.status.as_ref().and_then(|s| s.node_info.as_ref());
        Self {
            ready: if is_ready(node) { "Ready" } else { "NotReady" },
            role: node_role(node),
            version: info.map(|i| i.kubelet_version.clone()).unwrap_or_default(),
            ip: internal_ip(node),
            os: info.map(|i| i.os_image.clone()).unwrap_or_default(),
        }
    }
}

/// Returns `true` if the node `Ready` condition has status `True`.
pub fn is_ready(node: &Node) -> bool {
    node.status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .and_then(|c| c.iter().find(|c| c.type_ == "Ready"))
        .is_some_and(|c| c.status == "True")
}

/// Returns node role resolved from the well-known role labels, the first matching label wins.
pub fn node_role(node: &Node) -> &'static str {
    let labels = node.metadata.labels.as_ref();
    if labels.is_some_and(|l| l.contains_key(MASTER_LABEL)) {
        "master"
    } else if labels.is_some_and(|l| l.contains_key(CONTROL_PLANE_LABEL)) {
        "control-plane"
    } else {
        "worker"
    }
}

/// Returns first `InternalIP` address of the node.
pub fn internal_ip(node: &Node) -> String {
    node.status
        .as_ref()
        .and_then(|s| s.addresses.as_ref())
        .and_then(|a| a.iter().find(|a| a.type_ == "InternalIP"))
        .map(|a| a.address.clone())
        .unwrap_or_default()
}
