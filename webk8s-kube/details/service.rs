use k8s_openapi::api::core::v1::{EndpointSubset, Endpoints, Service, ServicePort};
use kube::{Api, Client, ResourceExt};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::ClusterError;

/// Detailed view of a single service with its flattened endpoint addresses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDetail {
    pub name: String,
    pub namespace: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(rename = "clusterIP")]
    pub cluster_ip: String,
    pub ports: Vec<ServicePort>,
    pub selector: BTreeMap<String, String>,
    pub endpoints: Vec<String>,
}

impl ServiceDetail {
    fn new(service: &Service, endpoints: Option<&Endpoints>) -> Self {
        let spec = service.spec.as_ref();
        Self {
            name: service.name_any(),
            namespace: service.namespace().unwrap_or_default(),
            type_: spec.and_then(|s| s.type_.clone()).unwrap_or_default(),
            cluster_ip: spec.and_then(|s| s.cluster_ip.clone()).unwrap_or_default(),
            ports: spec.and_then(|s| s.ports.clone()).unwrap_or_default(),
            selector: spec.and_then(|s| s.selector.clone()).unwrap_or_default(),
            endpoints: endpoints
                .and_then(|e| e.subsets.as_deref())
                .map(flatten_endpoints)
                .unwrap_or_default(),
        }
    }
}

/// Fetches service `name` from the `namespace` together with its endpoints.\
/// **Note** that missing endpoints object results in an empty endpoint list.
pub async fn service_detail(client: Client, namespace: &str, name: &str) -> Result<ServiceDetail, ClusterError> {
    let service = Api::<Service>::namespaced(client.clone(), namespace).get(name).await?;
    let endpoints = Api::<Endpoints>::namespaced(client, namespace).get_opt(name).await?;

    Ok(ServiceDetail::new(&service, endpoints.as_ref()))
}

/// Returns one `ip:port` entry for every address and port pair of the `subsets`.\
/// Addresses that are not ready get the ` (not ready)` suffix, addresses are emitted bare if there are no ports.
pub fn flatten_endpoints(subsets: &[EndpointSubset]) -> Vec<String> {
    let mut result = Vec::new();
    for subset in subsets {
        let ports = subset.ports.as_deref().unwrap_or_default();
        let ready = subset.addresses.iter().flatten().map(|a| (a.ip.as_str(), ""));
        let not_ready = subset
            .not_ready_addresses
            .iter()
            .flatten()
            .map(|a| (a.ip.as_str(), " (not ready)"));

        for (ip, suffix) in ready.chain(not_ready) {
            if ports.is_empty() {
                result.push(format!("{ip}{suffix}"));
            } else {
                result.extend(ports.iter().map(|p| format!("{ip}:{}{suffix}", p.port)));
            }
        }
    }

    result
}
