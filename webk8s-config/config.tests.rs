use rstest::rstest;

use super::*;

#[test]
fn parse_partial_config_test() {
    let config = Config::parse(
        r"
server:
  port: 9090
logs:
  tail_lines: 60
",
    )
    .unwrap();

    assert_eq!(9090, config.server.port);
    assert_eq!(ServerConfig::default().address, config.server.address);
    assert_eq!(PathBuf::from("./ui"), config.server.assets);
    assert_eq!(60, config.logs.tail_lines);
    assert_eq!(ClusterConfig::default(), config.cluster);
}

#[rstest]
#[case("")]
#[case("   \n")]
#[case("{}")]
fn parse_empty_config_test(#[case] text: &str) {
    assert_eq!(Config::default(), Config::parse(text).unwrap());
}

#[test]
fn parse_invalid_config_test() {
    assert!(matches!(
        Config::parse("server:\n  port: not-a-number\n"),
        Err(ConfigError::SerializationError(_))
    ));
}

#[test]
fn namespaces_timeout_test() {
    let config = Config::parse("cluster:\n  namespaces_timeout: 3\n").unwrap();
    assert_eq!(Duration::from_secs(3), config.cluster.namespaces_timeout());
    assert!(!config.cluster.insecure);
}

#[tokio::test]
async fn load_missing_explicit_file_test() {
    let result = Config::load_or_default(Some(Path::new("/definitely/not/here/config.yaml"))).await;
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}
