use kube::Config;
use std::sync::Arc;
use std::time::Duration;

use crate::testing::mock_client;

use super::*;

#[tokio::test]
async fn provider_with_client_returns_same_handle_test() {
    let (client, _handle) = mock_client();
    let provider = ClusterClientProvider::with_client(client);
    assert!(provider.is_initialized());

    let (first, second) = tokio::join!(provider.handle(), provider.handle());
    let first = first.unwrap();
    let second = second.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(first.connection().is_none());
    assert!(provider.client().await.is_ok());
}

#[test]
fn provider_is_lazy_test() {
    let provider = ClusterClientProvider::new(ClientOptions::default());
    assert!(!provider.is_initialized());
}

#[tokio::test]
async fn provider_fails_for_missing_kubeconfig_test() {
    let provider = ClusterClientProvider::new(ClientOptions {
        kube_config_path: Some("/definitely/not/here/kubeconfig".to_owned()),
        ..Default::default()
    });

    assert!(matches!(provider.handle().await, Err(ClientError::KubeconfigError(_))));
    assert!(!provider.is_initialized());
}

#[test]
fn streaming_config_has_no_read_timeout_test() {
    let mut config = Config::new("https://cluster.local:6443".parse().unwrap());
    config.read_timeout = Some(Duration::from_secs(295));
    config.connect_timeout = Some(Duration::from_secs(30));

    let streaming = streaming_config(&config);

    assert_eq!(None, streaming.read_timeout);
    assert_eq!(Some(Duration::from_secs(30)), streaming.connect_timeout);
    assert_eq!(config.cluster_url, streaming.cluster_url);
    assert_eq!(Some(Duration::from_secs(295)), config.read_timeout);
}
