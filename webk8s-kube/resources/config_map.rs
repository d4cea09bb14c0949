use k8s_openapi::api::core::v1::ConfigMap;
use serde::Serialize;

/// Status summary of the `configmap` kubernetes resource.\
/// **Note** that only text data entries are counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigMapSummary {
    pub keys: usize,
}

impl From<&ConfigMap> for ConfigMapSummary {
    fn from(config_map: &ConfigMap) -> Self {
        Self {
            keys: config_map.data.as_ref().map(|d| d.len()).unwrap_or_default(),
        }
    }
}
