use k8s_openapi::serde_json::{from_value, json};
use rstest::rstest;

use super::*;

#[test]
fn format_time_test() {
    let time: Time = from_value(json!("2024-03-05T10:20:30Z")).unwrap();
    assert_eq!("2024-03-05T10:20:30Z", format_time(Some(&time)));
    assert_eq!("", format_time(None));
}

#[rstest]
#[case("nginx-7c5ddbdf54-x2x9p", true)]
#[case("node-1.cluster.local", true)]
#[case("", false)]
#[case("..", false)]
#[case("../../api", false)]
#[case("Pod", false)]
#[case("pod?watch=true", false)]
fn is_valid_name_test(#[case] name: &str, #[case] expected: bool) {
    assert_eq!(expected, is_valid_name(name));
}
