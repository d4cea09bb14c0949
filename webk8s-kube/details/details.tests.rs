use k8s_openapi::api::core::v1::{ConfigMap, EndpointSubset};
use k8s_openapi::serde_json::{Value, from_value, json, to_value};

use crate::testing::{Exchange, fake_cluster, list};

use super::*;

fn subsets(value: Value) -> Vec<EndpointSubset> {
    from_value(value).unwrap()
}

#[test]
fn flatten_ready_addresses_with_ports_test() {
    let subsets = subsets(json!([{
        "addresses": [{ "ip": "10.1.0.1" }, { "ip": "10.1.0.2" }],
        "ports": [{ "port": 80 }, { "port": 443 }],
    }]));

    assert_eq!(
        vec!["10.1.0.1:80", "10.1.0.1:443", "10.1.0.2:80", "10.1.0.2:443"],
        flatten_endpoints(&subsets)
    );
}

#[test]
fn flatten_not_ready_address_without_ports_test() {
    let subsets = subsets(json!([{ "notReadyAddresses": [{ "ip": "10.1.0.9" }] }]));
    assert_eq!(vec!["10.1.0.9 (not ready)"], flatten_endpoints(&subsets));
}

#[test]
fn flatten_mixed_subsets_test() {
    let subsets = subsets(json!([
        { "addresses": [{ "ip": "10.1.0.1" }], "notReadyAddresses": [{ "ip": "10.1.0.2" }], "ports": [{ "port": 8080 }] },
        { "addresses": [{ "ip": "10.2.0.1" }] },
    ]));

    assert_eq!(
        vec!["10.1.0.1:8080", "10.1.0.2:8080 (not ready)", "10.2.0.1"],
        flatten_endpoints(&subsets)
    );
}

#[test]
fn config_map_keys_union_test() {
    let config_map: ConfigMap = from_value(json!({
        "metadata": { "name": "settings", "namespace": "shop", "labels": { "team": "web" } },
        "data": { "app.yaml": "a: 1", "shared": "text" },
        "binaryData": { "shared": "AQI=", "logo.png": "AAE=" },
    }))
    .unwrap();

    let detail = ConfigMapDetail::from(&config_map);

    assert_eq!(vec!["app.yaml", "logo.png", "shared"], detail.keys);
    assert_eq!(3, detail.key_count);
    assert_eq!(
        json!({
            "name": "settings",
            "namespace": "shop",
            "labels": { "team": "web" },
            "keys": ["app.yaml", "logo.png", "shared"],
            "keyCount": 3,
        }),
        to_value(detail).unwrap()
    );
}

#[tokio::test]
async fn pod_detail_test() {
    let (client, server) = fake_cluster(vec![Exchange::json(
        "/api/v1/namespaces/shop/pods/web",
        json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": { "name": "web", "namespace": "shop" },
            "spec": {
                "nodeName": "node-1",
                "containers": [{ "name": "app", "image": "nginx:1.27" }, { "name": "proxy", "image": "envoy" }],
                "initContainers": [{ "name": "migrate", "image": "tools" }],
            },
            "status": {
                "phase": "Running",
                "podIP": "10.1.0.7",
                "startTime": "2024-02-01T10:00:00Z",
                "containerStatuses": [
                    { "name": "app", "image": "nginx:1.27", "imageID": "", "ready": true, "restartCount": 3 },
                    { "name": "proxy", "image": "envoy", "imageID": "", "ready": false, "restartCount": 0 },
                ],
            },
        }),
    )]);

    let detail = pod_detail(client, "shop", "web").await.unwrap();
    server.await.unwrap();

    assert_eq!(
        json!({
            "name": "web",
            "namespace": "shop",
            "node": "node-1",
            "podIP": "10.1.0.7",
            "phase": "Running",
            "reason": "",
            "startTime": "2024-02-01T10:00:00Z",
            "ready": "1/2",
            "restarts": 3,
            "containers": [{ "name": "app", "image": "nginx:1.27" }, { "name": "proxy", "image": "envoy" }],
        }),
        to_value(detail).unwrap()
    );
}

#[tokio::test]
async fn pod_detail_not_found_test() {
    let (client, server) = fake_cluster(vec![Exchange::not_found(
        "/api/v1/namespaces/shop/pods/ghost",
        "pods",
        "ghost",
    )]);

    let error = pod_detail(client, "shop", "ghost").await.unwrap_err();
    server.await.unwrap();

    assert!(error.to_string().contains("pods \"ghost\" not found"));
}

#[tokio::test]
async fn pod_containers_test() {
    let (client, server) = fake_cluster(vec![Exchange::json(
        "/api/v1/namespaces/shop/pods/web",
        json!({
            "metadata": { "name": "web", "namespace": "shop" },
            "spec": { "containers": [{ "name": "app" }], "initContainers": [{ "name": "migrate" }] },
        }),
    )]);

    let containers = pod_containers(client, "shop", "web").await.unwrap();
    server.await.unwrap();

    assert_eq!(json!({ "containers": ["app"], "initContainers": ["migrate"] }), to_value(containers).unwrap());
}

#[tokio::test]
async fn pod_events_use_field_selector_test() {
    let (client, server) = fake_cluster(vec![
        Exchange::json(
            "/api/v1/namespaces/shop/events",
            list(
                "EventList",
                vec![json!({
                    "metadata": { "name": "web.17a", "namespace": "shop" },
                    "involvedObject": { "kind": "Pod", "name": "web" },
                    "reason": "Pulled",
                })],
            ),
        )
        .with_query("fieldSelector=involvedObject.name%3Dweb"),
    ]);

    let events = pod_events(client, "shop", "web").await.unwrap();
    server.await.unwrap();

    assert_eq!(1, events.len());
    assert_eq!(Some("Pulled"), events[0].reason.as_deref());
}

#[tokio::test]
async fn node_detail_test() {
    let (client, server) = fake_cluster(vec![
        Exchange::json(
            "/api/v1/nodes/node-1",
            json!({
                "metadata": { "name": "node-1", "labels": { "node-role.kubernetes.io/control-plane": "" } },
                "status": {
                    "conditions": [{ "type": "Ready", "status": "True" }],
                    "capacity": { "cpu": "4", "memory": "16Gi" },
                    "allocatable": { "cpu": "3800m", "memory": "15Gi" },
                },
            }),
        ),
        Exchange::json(
            "/api/v1/pods",
            list(
                "PodList",
                vec![json!({ "metadata": { "name": "etcd", "namespace": "kube-system" }, "status": { "phase": "Running" } })],
            ),
        )
        .with_query("fieldSelector=spec.nodeName%3Dnode-1"),
    ]);

    let detail = node_detail(client, "node-1").await.unwrap();
    server.await.unwrap();

    assert!(detail.ready);
    assert_eq!("control-plane", detail.role);
    assert_eq!(Some(&"3800m".to_owned()), detail.allocatable.get("cpu"));
    assert_eq!(
        vec![NodePod {
            name: "etcd".to_owned(),
            namespace: "kube-system".to_owned(),
            phase: "Running".to_owned(),
        }],
        detail.pods
    );
}

#[tokio::test]
async fn service_detail_without_endpoints_test() {
    let (client, server) = fake_cluster(vec![
        Exchange::json(
            "/api/v1/namespaces/shop/services/web",
            json!({
                "metadata": { "name": "web", "namespace": "shop" },
                "spec": {
                    "type": "ClusterIP",
                    "clusterIP": "10.96.0.10",
                    "selector": { "app": "web" },
                    "ports": [{ "port": 80, "protocol": "TCP" }],
                },
            }),
        ),
        Exchange::not_found("/api/v1/namespaces/shop/endpoints/web", "endpoints", "web"),
    ]);

    let detail = service_detail(client, "shop", "web").await.unwrap();
    server.await.unwrap();

    assert_eq!("ClusterIP", detail.type_);
    assert_eq!("10.96.0.10", detail.cluster_ip);
    assert_eq!(1, detail.ports.len());
    assert!(detail.endpoints.is_empty());
}

#[tokio::test]
async fn service_detail_with_endpoints_test() {
    let (client, server) = fake_cluster(vec![
        Exchange::json(
            "/api/v1/namespaces/shop/services/web",
            json!({ "metadata": { "name": "web", "namespace": "shop" }, "spec": { "type": "ClusterIP" } }),
        ),
        Exchange::json(
            "/api/v1/namespaces/shop/endpoints/web",
            json!({
                "metadata": { "name": "web", "namespace": "shop" },
                "subsets": [{ "addresses": [{ "ip": "10.1.0.3" }], "ports": [{ "port": 8080 }] }],
            }),
        ),
    ]);

    let detail = service_detail(client, "shop", "web").await.unwrap();
    server.await.unwrap();

    assert_eq!(vec!["10.1.0.3:8080"], detail.endpoints);
}
