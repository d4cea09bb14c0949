use k8s_openapi::serde_json::json;
use std::time::Duration;

use crate::testing::{Exchange, fake_cluster, list, mock_client};

use super::*;

#[tokio::test]
async fn list_namespaces_keeps_server_order_test() {
    let (client, server) = fake_cluster(vec![Exchange::json(
        "/api/v1/namespaces",
        list(
            "NamespaceList",
            vec![
                json!({ "metadata": { "name": "kube-system" } }),
                json!({ "metadata": { "name": "default" } }),
            ],
        ),
    )]);

    let names = list_namespaces(client, Duration::from_secs(5)).await.unwrap();
    server.await.unwrap();

    assert_eq!(vec!["kube-system", "default"], names);
}

#[tokio::test]
async fn list_namespaces_times_out_test() {
    let (client, _handle) = mock_client();

    let result = list_namespaces(client, Duration::from_millis(20)).await;

    assert!(matches!(result, Err(ClusterError::Timeout(_))));
    assert_eq!("request timed out after 20ms", result.unwrap_err().to_string());
}
