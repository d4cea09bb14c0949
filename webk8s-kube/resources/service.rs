use k8s_openapi::api::core::v1::Service;
use serde::Serialize;

/// Status summary of the `service` kubernetes resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(rename = "clusterIP")]
    pub cluster_ip: String,
}

impl From<&Service> for ServiceSummary {
    fn from(service: &Service) -> Self {
        let spec = service.spec.as_ref();
        Self {
            type_: spec.and_then(|s| s.type_.clone()).unwrap_or_default(),
            cluster_ip: spec.and_then(|s| s.cluster_ip.clone()).unwrap_or_default(),
        }
    }
}
