use http::StatusCode;
use k8s_openapi::serde_json::{json, to_value};

use crate::testing::{Exchange, fake_cluster, mock_client};

use super::*;

#[tokio::test]
async fn pod_metrics_available_test() {
    let payload = json!({
        "kind": "PodMetrics",
        "apiVersion": "metrics.k8s.io/v1beta1",
        "metadata": { "name": "web", "namespace": "shop" },
        "window": "15s",
        "containers": [{ "name": "app", "usage": { "cpu": "2m", "memory": "12Mi" } }],
    });
    let (client, server) = fake_cluster(vec![Exchange::json(
        "/apis/metrics.k8s.io/v1beta1/namespaces/shop/pods/web",
        payload.clone(),
    )]);

    let sample = pod_metrics(client, "shop", "web").await;
    server.await.unwrap();

    assert_eq!(MetricsSample::Available(payload.clone()), sample);
    assert_eq!(payload, to_value(sample).unwrap());
}

#[tokio::test]
async fn node_metrics_missing_service_test() {
    let (client, server) = fake_cluster(vec![Exchange::not_found(
        "/apis/metrics.k8s.io/v1beta1/nodes/node-1",
        "nodes.metrics.k8s.io",
        "node-1",
    )]);

    let sample = node_metrics(client, "node-1").await;
    server.await.unwrap();

    assert!(!sample.is_available());
    let value = to_value(&sample).unwrap();
    assert_eq!(json!(false), value["available"]);
    assert!(!value["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn pod_metrics_forbidden_test() {
    let (client, server) = fake_cluster(vec![Exchange::failure(
        "/apis/metrics.k8s.io/v1beta1/namespaces/shop/pods/web",
        StatusCode::FORBIDDEN,
        "Forbidden",
        "pods.metrics.k8s.io is forbidden",
    )]);

    let sample = pod_metrics(client, "shop", "web").await;
    server.await.unwrap();

    assert_eq!(MetricsSample::Unavailable(NOT_AVAILABLE.to_owned()), sample);
}

#[tokio::test]
async fn node_metrics_malformed_response_test() {
    let (client, server) = fake_cluster(vec![Exchange::text(
        "/apis/metrics.k8s.io/v1beta1/nodes/node-1",
        "<html>not json</html>",
    )]);

    let sample = node_metrics(client, "node-1").await;
    server.await.unwrap();

    assert_eq!(MetricsSample::Unavailable(PARSE_FAILED.to_owned()), sample);
}

#[tokio::test]
async fn metrics_reject_path_segments_test() {
    let (client, _handle) = mock_client();

    let sample = node_metrics(client, "../../api/v1/secrets").await;

    assert_eq!(MetricsSample::Unavailable(INVALID_NAME.to_owned()), sample);
}
