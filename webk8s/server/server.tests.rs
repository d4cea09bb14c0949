use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use k8s_openapi::serde_json::{Value, from_slice, json, to_vec};
use rstest::rstest;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use super::*;

type KubeRequest = Request<kube::client::Body>;
type KubeResponse = Response<kube::client::Body>;

/// Returns router backed by a fake cluster that answers `responses` in order, asserting request paths.
fn app(responses: Vec<(&'static str, StatusCode, Value)>) -> (Router, JoinHandle<()>) {
    let (service, mut handle) = tower_test::mock::pair::<KubeRequest, KubeResponse>();
    let server = tokio::spawn(async move {
        for (path, status, body) in responses {
            let (request, send) = handle.next_request().await.expect("expected request was not sent");
            assert_eq!(path, request.uri().path());
            let response = Response::builder()
                .status(status)
                .body(kube::client::Body::from(to_vec(&body).unwrap()))
                .unwrap();
            send.send_response(response);
        }
    });

    let provider = ClusterClientProvider::with_client(Client::new(service, "default"));
    let state = AppState::new(Arc::new(provider), Config::default());

    (router(state), server)
}

fn not_found(resource: &str, name: &str) -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": format!("{resource} \"{name}\" not found"),
        "reason": "NotFound",
        "code": 404,
    })
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    (status, body)
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, from_slice(&body).unwrap())
}

#[tokio::test]
async fn resource_types_test() {
    let (router, _) = app(vec![]);

    let (status, body) = get_json(router, "/api/resources/types").await;

    assert_eq!(StatusCode::OK, status);
    let kinds = body.as_array().unwrap();
    assert_eq!(11, kinds.len());
    assert_eq!(json!({ "key": "pods", "label": "Pods" }), kinds[0]);
    assert_eq!(json!({ "key": "services", "label": "Services" }), kinds[10]);
}

#[rstest]
#[case("/api/resources?namespace=default", "type parameter is required")]
#[case("/api/resources?namespace=default&type=widgets", "unsupported resource type: widgets")]
#[case("/api/resources?type=pods", "namespace parameter is required")]
#[case("/api/resources?namespace=&type=deployments", "namespace parameter is required")]
#[case("/api/pod?namespace=default", "namespace and pod parameters are required")]
#[case("/api/pod/events?pod=web", "namespace and pod parameters are required")]
#[case("/api/pod?namespace=default&pod=..%2Fsecrets", "invalid pod name")]
#[case("/api/node", "node parameter is required")]
#[case("/api/service?namespace=default", "namespace and service parameters are required")]
#[case("/api/configmap?configmap=settings", "namespace and configmap parameters are required")]
#[case("/api/pod/metrics?pod=web", "namespace and pod parameters are required")]
#[tokio::test]
async fn bad_request_test(#[case] uri: &str, #[case] message: &str) {
    let (router, _) = app(vec![]);

    let (status, body) = get_json(router, uri).await;

    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert_eq!(json!({ "error": message }), body);
}

#[tokio::test]
async fn nodes_do_not_require_namespace_test() {
    let (router, server) = app(vec![(
        "/api/v1/nodes",
        StatusCode::OK,
        json!({ "apiVersion": "v1", "kind": "NodeList", "metadata": {}, "items": [] }),
    )]);

    let (status, body) = get_json(router, "/api/resources?type=Nodes").await;
    server.await.unwrap();

    assert_eq!(StatusCode::OK, status);
    assert_eq!(json!([]), body);
}

#[tokio::test]
async fn pods_are_listed_test() {
    let (router, server) = app(vec![(
        "/api/v1/namespaces/shop/pods",
        StatusCode::OK,
        json!({
            "apiVersion": "v1",
            "kind": "PodList",
            "metadata": {},
            "items": [{
                "metadata": { "name": "web", "namespace": "shop", "creationTimestamp": "2024-01-02T03:04:05Z" },
                "spec": { "containers": [{ "name": "app" }] },
                "status": { "phase": "Pending" },
            }],
        }),
    )]);

    let (status, body) = get_json(router, "/api/resources?namespace=shop&type=pods").await;
    server.await.unwrap();

    assert_eq!(StatusCode::OK, status);
    assert_eq!(
        json!([{
            "name": "web",
            "namespace": "shop",
            "creationTimestamp": "2024-01-02T03:04:05Z",
            "labels": {},
            "status": { "phase": "Pending", "ready": "0/1", "restarts": 0, "nodeName": "", "reason": "" },
        }]),
        body
    );
}

#[tokio::test]
async fn missing_pod_is_server_error_test() {
    let (router, server) = app(vec![(
        "/api/v1/namespaces/shop/pods/ghost",
        StatusCode::NOT_FOUND,
        not_found("pods", "ghost"),
    )]);

    let (status, body) = get_json(router, "/api/pod?namespace=shop&pod=ghost").await;
    server.await.unwrap();

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
    assert!(body["error"].as_str().unwrap().contains("pods \"ghost\" not found"));
}

#[tokio::test]
async fn pod_metrics_unavailable_test() {
    let (router, server) = app(vec![(
        "/apis/metrics.k8s.io/v1beta1/namespaces/shop/pods/web",
        StatusCode::NOT_FOUND,
        not_found("pods.metrics.k8s.io", "web"),
    )]);

    let (status, body) = get_json(router, "/api/pod/metrics?namespace=shop&pod=web").await;
    server.await.unwrap();

    assert_eq!(StatusCode::OK, status);
    assert_eq!(json!(false), body["available"]);
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn node_metrics_available_test() {
    let metrics = json!({
        "kind": "NodeMetrics",
        "apiVersion": "metrics.k8s.io/v1beta1",
        "metadata": { "name": "node-1" },
        "usage": { "cpu": "250m", "memory": "1Gi" },
    });
    let (router, server) = app(vec![(
        "/apis/metrics.k8s.io/v1beta1/nodes/node-1",
        StatusCode::OK,
        metrics.clone(),
    )]);

    let (status, body) = get_json(router, "/api/node/metrics?node=node-1").await;
    server.await.unwrap();

    assert_eq!(StatusCode::OK, status);
    assert_eq!(metrics, body);
}

#[tokio::test]
async fn logs_missing_parameters_test() {
    let (router, _) = app(vec![]);

    let (status, body) = get(router, "/api/logs/stream?namespace=shop").await;
    let body = String::from_utf8(body).unwrap();

    assert_eq!(StatusCode::OK, status);
    assert!(body.contains("event: message\n"));
    assert!(body.contains("data: ERROR: namespace and pod parameters are required\n"));
}

#[tokio::test]
async fn logs_unknown_container_test() {
    let (router, server) = app(vec![(
        "/api/v1/namespaces/shop/pods/web",
        StatusCode::OK,
        json!({ "metadata": { "name": "web", "namespace": "shop" }, "spec": { "containers": [{ "name": "app" }] } }),
    )]);

    let (status, body) = get(router, "/api/logs/stream?namespace=shop&pod=web&container=db").await;
    server.await.unwrap();
    let body = String::from_utf8(body).unwrap();

    assert_eq!(StatusCode::OK, status);
    assert_eq!(1, body.matches("ERROR").count());
    assert!(body.contains("data: ERROR: Container 'db' not found in pod\n"));
}
