use k8s_openapi::api::core::v1::Namespace;
use kube::api::ListParams;
use kube::{Api, Client, ResourceExt};
use std::time::Duration;

use crate::ClusterError;

#[cfg(test)]
#[path = "./namespaces.tests.rs"]
mod namespaces_tests;

/// Returns names of all namespaces in the cluster, in the order returned by the API server.\
/// **Note** that the whole request must finish within the `timeout`.
pub async fn list_namespaces(client: Client, timeout: Duration) -> Result<Vec<String>, ClusterError> {
    let api: Api<Namespace> = Api::all(client);
    let list = tokio::time::timeout(timeout, api.list(&ListParams::default()))
        .await
        .map_err(|_| ClusterError::Timeout(timeout))??;

    Ok(list.items.iter().map(ResourceExt::name_any).collect())
}
