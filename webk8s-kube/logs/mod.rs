use futures::{AsyncRead, Stream};
use futures::stream;
use k8s_openapi::api::core::v1::Pod;
use kube::api::LogParams;
use kube::{Api, Client};
use serde::Deserialize;
use std::borrow::Cow;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::utils::is_valid_name;

pub use self::session::LogSession;

mod session;

#[cfg(test)]
#[path = "./logs.tests.rs"]
mod logs_tests;

pub const MIN_TAIL_LINES: i64 = 50;
pub const MAX_TAIL_LINES: i64 = 100;
const EVENTS_BUFFER: usize = 16;

/// Possible errors from opening a log session.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    /// Namespace or pod name was not provided.
    #[error("namespace and pod parameters are required")]
    MissingParameters,

    /// Namespace or pod name contains forbidden characters.
    #[error("invalid object name: {0}")]
    InvalidName(String),

    /// Pod could not be fetched.
    #[error("Pod not found: {0}")]
    PodNotFound(#[source] kube::Error),

    /// Requested container is not declared in the pod spec.
    #[error("Container '{0}' not found in pod")]
    ContainerNotFound(String),

    /// Log feed could not be opened.
    #[error("Cannot open log stream: {0}")]
    FeedError(#[source] kube::Error),
}

/// Raw log streaming request, all parameters are optional until validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogRequest {
    pub namespace: Option<String>,
    pub pod: Option<String>,
    pub container: Option<String>,
}

/// Validated pod (and optionally container) whose logs are streamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub namespace: String,
    pub pod: String,
    pub container: Option<String>,
}

impl TryFrom<LogRequest> for LogTarget {
    type Error = LogError;

    fn try_from(value: LogRequest) -> Result<Self, Self::Error> {
        let namespace = value.namespace.filter(|n| !n.is_empty());
        let pod = value.pod.filter(|p| !p.is_empty());
        let (Some(namespace), Some(pod)) = (namespace, pod) else {
            return Err(LogError::MissingParameters);
        };

        if let Some(name) = [&namespace, &pod].into_iter().find(|n| !is_valid_name(n)) {
            return Err(LogError::InvalidName(name.clone()));
        }

        Ok(Self {
            namespace,
            pod,
            container: value.container.filter(|c| !c.is_empty()),
        })
    }
}

impl std::fmt::Display for LogTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.pod)?;
        if let Some(container) = &self.container {
            write!(f, " ({container})")?;
        }

        Ok(())
    }
}

/// Single event pushed to the log streaming client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// Next piece of the log output.
    Chunk(String),

    /// Terminal error, the session ends after it.
    Error(String),
}

impl LogEvent {
    /// Returns text that should be sent to the client for this event.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            LogEvent::Chunk(text) => Cow::Borrowed(text),
            LogEvent::Error(message) => Cow::Owned(format!("ERROR: {message}\n")),
        }
    }
}

impl From<LogError> for LogEvent {
    fn from(value: LogError) -> Self {
        LogEvent::Error(value.to_string())
    }
}

/// Starts streaming logs for the `request` and returns stream of [`LogEvent`]s.\
/// The feed is released as soon as the returned stream is dropped.\
/// **Note** that `tail_lines` is clamped to the `50..=100` range.
pub fn stream_logs(client: Client, request: LogRequest, tail_lines: i64) -> impl Stream<Item = LogEvent> + Send + 'static {
    let (tx, rx) = mpsc::channel(EVENTS_BUFFER);
    tokio::spawn(run_session(client, request, tail_lines, tx));

    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|event| (event, rx)) })
}

async fn run_session(client: Client, request: LogRequest, tail_lines: i64, tx: mpsc::Sender<LogEvent>) {
    let opened = tokio::select! {
        () = tx.closed() => {
            debug!("log stream client disconnected before the feed was opened");
            return;
        },
        opened = open_session(client, request, tail_lines) => opened,
    };

    match opened {
        Ok(session) => pump(session, tx).await,
        Err(err) => {
            if matches!(err, LogError::MissingParameters | LogError::InvalidName(_)) {
                debug!("log stream rejected: {}", err);
            } else {
                warn!("cannot stream logs: {}", err);
            }

            let _ = tx.send(err.into()).await;
        },
    }
}

async fn open_session(
    client: Client,
    request: LogRequest,
    tail_lines: i64,
) -> Result<LogSession<impl AsyncRead + Unpin + Send>, LogError> {
    let target = LogTarget::try_from(request)?;
    let api: Api<Pod> = Api::namespaced(client, &target.namespace);
    validate_target(&api, &target).await?;

    let params = LogParams {
        follow: true,
        container: target.container.clone(),
        tail_lines: Some(tail_lines.clamp(MIN_TAIL_LINES, MAX_TAIL_LINES)),
        ..LogParams::default()
    };

    let feed = api.log_stream(&target.pod, &params).await.map_err(LogError::FeedError)?;
    let session = LogSession::new(target, Box::pin(feed));
    info!("log session {} opened for {}", session.id(), session.target());

    Ok(session)
}

/// Forwards chunks of the `session` feed to `tx` until the feed ends or the receiver is dropped.
async fn pump<R: AsyncRead + Unpin>(mut session: LogSession<R>, tx: mpsc::Sender<LogEvent>) {
    loop {
        tokio::select! {
            () = tx.closed() => break,
            chunk = session.next_chunk() => match chunk {
                Ok(Some(text)) => {
                    if tx.send(LogEvent::Chunk(text)).await.is_err() {
                        break;
                    }
                },
                Ok(None) => break,
                Err(err) => {
                    warn!("log session {} read error: {}", session.id(), err);
                    break;
                },
            },
        }
    }
}

async fn validate_target(api: &Api<Pod>, target: &LogTarget) -> Result<(), LogError> {
    let pod = api.get(&target.pod).await.map_err(LogError::PodNotFound)?;
    if let Some(container) = &target.container
        && !has_container(&pod, container)
    {
        return Err(LogError::ContainerNotFound(container.clone()));
    }

    Ok(())
}

/// Returns `true` if `name` is one of the containers or init containers declared in the pod spec.
pub fn has_container(pod: &Pod, name: &str) -> bool {
    pod.spec.as_ref().is_some_and(|spec| {
        spec.containers
            .iter()
            .chain(spec.init_containers.iter().flatten())
            .any(|c| c.name == name)
    })
}
