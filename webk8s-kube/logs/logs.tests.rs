use futures::{StreamExt, TryStreamExt};
use k8s_openapi::serde_json::{Value, from_value, json};
use rstest::rstest;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::testing::{Exchange, fake_cluster, mock_client};

use super::*;

fn pod_body() -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": { "name": "web", "namespace": "shop" },
        "spec": {
            "containers": [{ "name": "app" }, { "name": "proxy" }],
            "initContainers": [{ "name": "migrate" }],
        },
    })
}

/// Feed that never produces data and records when it is released.
struct IdleFeed(Arc<AtomicBool>);

impl AsyncRead for IdleFeed {
    fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &mut [u8]) -> Poll<std::io::Result<usize>> {
        Poll::Pending
    }
}

impl Drop for IdleFeed {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

fn target() -> LogTarget {
    LogTarget {
        namespace: "shop".to_owned(),
        pod: "web".to_owned(),
        container: None,
    }
}

fn request(namespace: &str, pod: &str, container: Option<&str>) -> LogRequest {
    LogRequest {
        namespace: Some(namespace.to_owned()),
        pod: Some(pod.to_owned()),
        container: container.map(str::to_owned),
    }
}

#[rstest]
#[case(LogRequest::default())]
#[case(request("", "web", None))]
#[case(request("shop", "", None))]
fn target_requires_namespace_and_pod_test(#[case] request: LogRequest) {
    assert!(matches!(LogTarget::try_from(request), Err(LogError::MissingParameters)));
}

#[test]
fn target_rejects_invalid_names_test() {
    let result = LogTarget::try_from(request("shop", "../nodes", None));
    assert!(matches!(result, Err(LogError::InvalidName(name)) if name == "../nodes"));
}

#[test]
fn target_ignores_empty_container_test() {
    let target = LogTarget::try_from(request("shop", "web", Some(""))).unwrap();
    assert_eq!(None, target.container);
    assert_eq!("shop/web", target.to_string());
}

#[test]
fn error_event_text_test() {
    let event = LogEvent::from(LogError::ContainerNotFound("db".to_owned()));
    assert_eq!("ERROR: Container 'db' not found in pod\n", event.text());
    assert_eq!("abc", LogEvent::Chunk("abc".to_owned()).text());
}

#[rstest]
#[case("app", true)]
#[case("migrate", true)]
#[case("db", false)]
fn has_container_test(#[case] name: &str, #[case] expected: bool) {
    let pod: Pod = from_value(pod_body()).unwrap();
    assert_eq!(expected, has_container(&pod, name));
}

#[tokio::test]
async fn missing_parameters_produce_single_error_test() {
    let (client, _handle) = mock_client();

    let events = stream_logs(client, request("shop", "", None), 100).collect::<Vec<_>>().await;

    assert_eq!(
        vec![LogEvent::Error("namespace and pod parameters are required".to_owned())],
        events
    );
}

#[tokio::test]
async fn unknown_container_produces_single_error_test() {
    let (client, server) = fake_cluster(vec![Exchange::json("/api/v1/namespaces/shop/pods/web", pod_body())]);

    let events = stream_logs(client, request("shop", "web", Some("db")), 100)
        .collect::<Vec<_>>()
        .await;
    server.await.unwrap();

    assert_eq!(vec![LogEvent::Error("Container 'db' not found in pod".to_owned())], events);
}

#[tokio::test]
async fn missing_pod_produces_single_error_test() {
    let (client, server) = fake_cluster(vec![Exchange::not_found(
        "/api/v1/namespaces/shop/pods/ghost",
        "pods",
        "ghost",
    )]);

    let events = stream_logs(client, request("shop", "ghost", None), 100)
        .collect::<Vec<_>>()
        .await;
    server.await.unwrap();

    assert_eq!(1, events.len());
    assert!(matches!(&events[0], LogEvent::Error(message) if message.starts_with("Pod not found: ")));
}

#[tokio::test]
async fn log_chunks_are_streamed_test() {
    let (client, server) = fake_cluster(vec![
        Exchange::json("/api/v1/namespaces/shop/pods/web", pod_body()),
        Exchange::text("/api/v1/namespaces/shop/pods/web/log", "line 1\r\nline 2\n")
            .with_query("follow=true")
            .with_query("container=migrate")
            .with_query("tailLines=100"),
    ]);

    let events = stream_logs(client, request("shop", "web", Some("migrate")), 500)
        .collect::<Vec<_>>()
        .await;
    server.await.unwrap();

    let text = events
        .iter()
        .map(|e| match e {
            LogEvent::Chunk(text) => text.as_str(),
            LogEvent::Error(message) => panic!("unexpected error: {message}"),
        })
        .collect::<String>();
    assert_eq!("line 1\nline 2\n", text);
}

#[tokio::test]
async fn idle_feed_is_released_on_disconnect_test() {
    let released = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel(1);
    let task = tokio::spawn(pump(LogSession::new(target(), IdleFeed(Arc::clone(&released))), tx));

    tokio::task::yield_now().await;
    assert!(!task.is_finished());
    assert!(!released.load(Ordering::SeqCst));

    drop(rx);
    timeout(Duration::from_secs(5), task).await.unwrap().unwrap();

    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test]
async fn quiet_feed_keeps_streaming_test() {
    let items = futures::stream::unfold(false, |sent| async move {
        if sent {
            return None;
        }

        sleep(Duration::from_millis(50)).await;
        Some((Ok::<_, std::io::Error>(&b"late line\n"[..]), true))
    });
    let (tx, mut rx) = mpsc::channel(1);
    let task = tokio::spawn(pump(LogSession::new(target(), Box::pin(items).into_async_read()), tx));

    assert_eq!(Some(LogEvent::Chunk("late line\n".to_owned())), rx.recv().await);
    assert_eq!(None, rx.recv().await);
    task.await.unwrap();
}

#[tokio::test]
async fn disconnect_during_pod_lookup_ends_session_test() {
    let (client, mut handle) = mock_client();
    let (tx, rx) = mpsc::channel(1);
    let task = tokio::spawn(run_session(client, request("shop", "web", None), 100, tx));

    let (pending, _response) = handle.next_request().await.unwrap();
    assert_eq!("/api/v1/namespaces/shop/pods/web", pending.uri().path());

    drop(rx);
    timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
}
