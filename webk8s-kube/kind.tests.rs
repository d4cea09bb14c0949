use k8s_openapi::serde_json::{json, to_value};
use rstest::rstest;

use super::*;

#[rstest]
#[case("pods", ResourceKind::Pods)]
#[case("PODS", ResourceKind::Pods)]
#[case("Nodes", ResourceKind::Nodes)]
#[case("cronJobs", ResourceKind::CronJobs)]
#[case("ReplicaSets", ResourceKind::ReplicaSets)]
#[case("configmaps", ResourceKind::ConfigMaps)]
fn parse_kind_test(#[case] input: &str, #[case] expected: ResourceKind) {
    assert_eq!(expected, input.parse::<ResourceKind>().unwrap());
}

#[rstest]
#[case("widgets")]
#[case("pod")]
#[case("")]
fn parse_unsupported_kind_test(#[case] input: &str) {
    let result = input.parse::<ResourceKind>();
    assert!(matches!(result, Err(ClusterError::UnsupportedKind(_))));
}

#[test]
fn unsupported_kind_message_test() {
    let error = "Widgets".parse::<ResourceKind>().unwrap_err();
    assert_eq!("unsupported resource type: widgets", error.to_string());
}

#[test]
fn kinds_roundtrip_keys_test() {
    for kind in RESOURCE_KINDS {
        assert_eq!(kind, kind.key().parse::<ResourceKind>().unwrap());
    }

    assert_eq!(1, RESOURCE_KINDS.iter().filter(|k| !k.is_namespaced()).count());
}

#[test]
fn serialize_kind_test() {
    assert_eq!(
        json!({ "key": "statefulsets", "label": "StatefulSets" }),
        to_value(ResourceKind::StatefulSets).unwrap()
    );
}
