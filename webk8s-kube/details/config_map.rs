use k8s_openapi::api::core::v1::ConfigMap;
use kube::{Api, Client, ResourceExt};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::ClusterError;

/// Config map metadata and key names, values are never exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapDetail {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub keys: Vec<String>,
    pub key_count: usize,
}

impl From<&ConfigMap> for ConfigMapDetail {
    fn from(config_map: &ConfigMap) -> Self {
        let keys = config_map
            .data
            .iter()
            .flat_map(BTreeMap::keys)
            .chain(config_map.binary_data.iter().flat_map(BTreeMap::keys))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        Self {
            name: config_map.name_any(),
            namespace: config_map.namespace().unwrap_or_default(),
            labels: config_map.labels().clone(),
            key_count: keys.len(),
            keys,
        }
    }
}

/// Fetches config map `name` from the `namespace` and returns its [`ConfigMapDetail`].
pub async fn config_map_detail(client: Client, namespace: &str, name: &str) -> Result<ConfigMapDetail, ClusterError> {
    let config_map = Api::<ConfigMap>::namespaced(client, namespace).get(name).await?;
    Ok(ConfigMapDetail::from(&config_map))
}
