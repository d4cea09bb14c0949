use k8s_openapi::api::apps::v1::Deployment;
use serde::Serialize;

/// Status summary of the `deployment` kubernetes resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummary {
    pub ready_replicas: i32,
    pub replicas: i32,
    pub updated: i32,
    pub available: i32,
}

impl From<&Deployment> for DeploymentSummary {
    fn from(deployment: &Deployment) -> Self {
        let status = deployment.status.as_ref();
        Self {
            ready_replicas: status.and_then(|s| s.ready_replicas).unwrap_or_default(),
            replicas: deployment.spec.as_ref().and_then(|s| s.replicas).unwrap_or_default(),
            updated: status.and_then(|s| s.updated_replicas).unwrap_or_default(),
            available: status.and_then(|s| s.available_replicas).unwrap_or_default(),
        }
    }
}
