use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{Node, Pod};
use k8s_openapi::serde_json::{Value, from_value, json, to_value};
use rstest::rstest;

use crate::testing::{Exchange, fake_cluster, list as list_body};

use super::*;

fn object<K: DeserializeOwned>(value: Value) -> K {
    from_value(value).unwrap()
}

fn pod_with_statuses(statuses: Value) -> Pod {
    object(json!({
        "metadata": { "name": "web", "namespace": "default" },
        "spec": {
            "nodeName": "node-1",
            "containers": [
                { "name": "app", "image": "nginx" },
                { "name": "sidecar", "image": "envoy" },
                { "name": "metrics", "image": "exporter" },
            ],
        },
        "status": { "phase": "Running", "containerStatuses": statuses },
    }))
}

fn container_status(name: &str, ready: bool, restarts: i32, waiting: Option<&str>) -> Value {
    let state = match waiting {
        Some(reason) => json!({ "waiting": { "reason": reason } }),
        None => json!({ "running": {} }),
    };

    json!({
        "name": name,
        "image": "img",
        "imageID": "",
        "ready": ready,
        "restartCount": restarts,
        "state": state,
    })
}

#[test]
fn pod_summary_test() {
    let pod = pod_with_statuses(json!([
        container_status("app", true, 1, None),
        container_status("sidecar", true, 2, None),
        container_status("metrics", false, 4, Some("CrashLoopBackOff")),
    ]));

    let summary = PodSummary::from(&pod);

    assert_eq!("2/3", summary.ready);
    assert_eq!(7, summary.restarts);
    assert_eq!("Running", summary.phase);
    assert_eq!("node-1", summary.node_name);
    assert_eq!("CrashLoopBackOff", summary.reason);
}

#[test]
fn pod_waiting_reason_follows_spec_order_test() {
    let pod = pod_with_statuses(json!([
        container_status("metrics", false, 0, Some("ImagePullBackOff")),
        container_status("sidecar", false, 0, Some("")),
        container_status("app", false, 0, Some("ContainerCreating")),
    ]));

    assert_eq!("ContainerCreating", waiting_reason(&pod));
}

#[test]
fn pod_without_status_test() {
    let pod: Pod = object(json!({ "metadata": { "name": "pending" }, "spec": { "containers": [{ "name": "app" }] } }));

    assert_eq!("0/1", ready_ratio(&pod));
    assert_eq!(0, restart_count(&pod));
    assert_eq!("", waiting_reason(&pod));
}

#[rstest]
#[case(json!({}), "worker")]
#[case(json!({ "node-role.kubernetes.io/control-plane": "" }), "control-plane")]
#[case(json!({ "node-role.kubernetes.io/master": "" }), "master")]
#[case(json!({ "node-role.kubernetes.io/master": "", "node-role.kubernetes.io/control-plane": "" }), "master")]
fn node_role_test(#[case] labels: Value, #[case] expected: &str) {
    let node: Node = object(json!({ "metadata": { "name": "node-1", "labels": labels } }));
    assert_eq!(expected, node_role(&node));
}

#[test]
fn node_summary_test() {
    let node: Node = object(json!({
        "metadata": { "name": "node-1" },
        "status": {
            "conditions": [
                { "type": "MemoryPressure", "status": "False" },
                { "type": "Ready", "status": "True" },
            ],
            "addresses": [
                { "type": "Hostname", "address": "node-1" },
                { "type": "InternalIP", "address": "10.0.0.4" },
                { "type": "InternalIP", "address": "10.0.0.5" },
            ],
            "nodeInfo": {
                "architecture": "amd64",
                "bootID": "",
                "containerRuntimeVersion": "containerd://1.7.0",
                "kernelVersion": "6.1.0",
                "kubeProxyVersion": "v1.30.1",
                "kubeletVersion": "v1.30.1",
                "machineID": "",
                "operatingSystem": "linux",
                "osImage": "Ubuntu 22.04.4 LTS",
                "systemUUID": "",
            },
        },
    }));

    assert_eq!(
        json!({ "ready": "Ready", "role": "worker", "version": "v1.30.1", "ip": "10.0.0.4", "os": "Ubuntu 22.04.4 LTS" }),
        to_value(ResourceStatus::from(&node)).unwrap()
    );
}

#[test]
fn node_not_ready_without_conditions_test() {
    let node: Node = object(json!({ "metadata": { "name": "node-1" } }));
    assert!(!is_ready(&node));
    assert_eq!("", internal_ip(&node));
}

#[test]
fn workload_defaults_test() {
    let deployment: Deployment = object(json!({ "metadata": { "name": "d" }, "spec": { "selector": {}, "template": {} } }));
    let stateful_set: StatefulSet = object(json!({ "metadata": { "name": "s" } }));
    let daemon_set: DaemonSet = object(json!({ "metadata": { "name": "ds" } }));
    let job: Job = object(json!({ "metadata": { "name": "j" }, "spec": { "template": {} } }));

    assert_eq!(
        json!({ "readyReplicas": 0, "replicas": 0, "updated": 0, "available": 0 }),
        to_value(ResourceStatus::from(&deployment)).unwrap()
    );
    assert_eq!(
        json!({ "readyReplicas": 0, "replicas": 0, "updated": 0, "current": 0 }),
        to_value(ResourceStatus::from(&stateful_set)).unwrap()
    );
    assert_eq!(
        json!({ "readyReplicas": 0, "replicas": 0, "current": 0, "available": 0 }),
        to_value(ResourceStatus::from(&daemon_set)).unwrap()
    );
    assert_eq!(
        json!({ "active": 0, "succeeded": 0, "failed": 0, "parallelism": 1, "completions": 0 }),
        to_value(ResourceStatus::from(&job)).unwrap()
    );
}

#[test]
fn cron_job_summary_test() {
    let cron_job: CronJob = object(json!({
        "metadata": { "name": "backup" },
        "spec": { "schedule": "0 3 * * *", "suspend": true, "jobTemplate": {} },
        "status": {
            "active": [{ "kind": "Job", "name": "backup-1" }],
            "lastScheduleTime": "2024-05-01T03:00:00Z",
        },
    }));

    assert_eq!(
        json!({ "schedule": "0 3 * * *", "suspend": "true", "activeJobs": 1, "lastScheduleAt": "2024-05-01T03:00:00Z" }),
        to_value(ResourceStatus::from(&cron_job)).unwrap()
    );
}

#[test]
fn row_test() {
    let pod: Pod = object(json!({
        "metadata": {
            "name": "web",
            "namespace": "shop",
            "creationTimestamp": "2024-01-02T03:04:05Z",
            "labels": { "app": "web" },
        },
    }));

    let row = ResourceRow::new(&pod);

    assert_eq!(
        json!({
            "name": "web",
            "namespace": "shop",
            "creationTimestamp": "2024-01-02T03:04:05Z",
            "labels": { "app": "web" },
            "status": { "phase": "", "ready": "0/0", "restarts": 0, "nodeName": "", "reason": "" },
        }),
        to_value(row).unwrap()
    );
}

#[rstest]
#[case("nodes", "/api/v1/nodes")]
#[case("pods", "/api/v1/namespaces/shop/pods")]
#[case("services", "/api/v1/namespaces/shop/services")]
#[case("configmaps", "/api/v1/namespaces/shop/configmaps")]
#[case("secrets", "/api/v1/namespaces/shop/secrets")]
#[case("deployments", "/apis/apps/v1/namespaces/shop/deployments")]
#[case("replicasets", "/apis/apps/v1/namespaces/shop/replicasets")]
#[case("statefulsets", "/apis/apps/v1/namespaces/shop/statefulsets")]
#[case("daemonsets", "/apis/apps/v1/namespaces/shop/daemonsets")]
#[case("jobs", "/apis/batch/v1/namespaces/shop/jobs")]
#[case("cronjobs", "/apis/batch/v1/namespaces/shop/cronjobs")]
#[tokio::test]
async fn list_empty_collection_test(#[case] kind: &str, #[case] path: &str) {
    let (client, server) = fake_cluster(vec![Exchange::json(path, list_body("List", vec![]))]);

    let rows = list(client, "shop", kind).await.unwrap();
    server.await.unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn list_all_namespaces_keeps_order_test() {
    let (client, server) = fake_cluster(vec![Exchange::json(
        "/api/v1/configmaps",
        list_body(
            "ConfigMapList",
            vec![
                json!({ "metadata": { "name": "zeta", "namespace": "b" }, "data": { "a": "1", "b": "2" } }),
                json!({ "metadata": { "name": "alpha", "namespace": "a" } }),
            ],
        ),
    )]);

    let rows = list(client, "", "ConfigMaps").await.unwrap();
    server.await.unwrap();

    assert_eq!(vec!["zeta", "alpha"], rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>());
    assert_eq!(ResourceStatus::ConfigMap(ConfigMapSummary { keys: 2 }), rows[0].status);
}

#[tokio::test]
async fn list_unsupported_kind_test() {
    let (client, _handle) = crate::testing::mock_client();

    let result = list(client, "default", "widgets").await;

    assert!(matches!(result, Err(ClusterError::UnsupportedKind(kind)) if kind == "widgets"));
}

#[tokio::test]
async fn list_propagates_api_error_test() {
    let (client, server) = fake_cluster(vec![Exchange::failure(
        "/api/v1/namespaces/locked/secrets",
        http::StatusCode::FORBIDDEN,
        "Forbidden",
        "secrets is forbidden",
    )]);

    let result = list(client, "locked", "secrets").await;
    server.await.unwrap();

    assert!(matches!(result, Err(ClusterError::Kube(_))));
}
