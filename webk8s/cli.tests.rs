use std::net::Ipv4Addr;

use super::*;

#[test]
fn command_line_overrides_config_test() {
    let args = Args::parse_from([
        "webk8s",
        "--address",
        "127.0.0.1",
        "--port",
        "9090",
        "--context",
        "kind-dev",
        "--insecure",
    ]);
    let mut config = Config::default();

    args.apply(&mut config);
    let options = args.client_options(&config);

    assert_eq!(IpAddr::V4(Ipv4Addr::LOCALHOST), config.server.address);
    assert_eq!(9090, config.server.port);
    assert!(config.cluster.insecure);
    assert_eq!(Some("kind-dev"), options.context.as_deref());
    assert!(options.allow_insecure);
}

#[test]
fn config_values_are_kept_when_not_overridden_test() {
    let args = Args::parse_from(["webk8s", "--assets", "/srv/ui"]);
    let mut config = Config::parse("server:\n  port: 7000\ncluster:\n  insecure: true\n").unwrap();

    args.apply(&mut config);

    assert_eq!(PathBuf::from("/srv/ui"), config.server.assets);
    assert!(config.cluster.insecure);
    if std::env::var_os("PORT").is_none() {
        assert_eq!(7000, config.server.port);
    }
}
