use k8s_openapi::serde_json::{Value, from_str};
use kube::Client;
use serde::Serialize;
use serde::ser::SerializeStruct;
use tracing::debug;

use crate::utils::is_valid_name;

#[cfg(test)]
#[path = "./metrics.tests.rs"]
mod metrics_tests;

const METRICS_API: &str = "/apis/metrics.k8s.io/v1beta1";
const NOT_AVAILABLE: &str = "metrics not available (metrics-server missing or RBAC)";
const PARSE_FAILED: &str = "failed to parse metrics";
const INVALID_NAME: &str = "invalid object name";

/// Point-in-time resource usage sample returned by the metrics API.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsSample {
    /// Raw metrics object as returned by the API server.
    Available(Value),

    /// Metrics could not be obtained, with human-readable reason.
    Unavailable(String),
}

impl MetricsSample {
    /// Returns `true` if metrics were obtained.
    pub fn is_available(&self) -> bool {
        matches!(self, MetricsSample::Available(_))
    }
}

impl Serialize for MetricsSample {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricsSample::Available(value) => value.serialize(serializer),
            MetricsSample::Unavailable(message) => {
                let mut state = serializer.serialize_struct("MetricsSample", 2)?;
                state.serialize_field("available", &false)?;
                state.serialize_field("message", message)?;
                state.end()
            },
        }
    }
}

/// Fetches current metrics of the pod `name` in the `namespace`.\
/// **Note** that it never fails, any problem is reported as [`MetricsSample::Unavailable`].
pub async fn pod_metrics(client: Client, namespace: &str, name: &str) -> MetricsSample {
    if !is_valid_name(namespace) || !is_valid_name(name) {
        return MetricsSample::Unavailable(INVALID_NAME.to_owned());
    }

    fetch(client, format!("{METRICS_API}/namespaces/{namespace}/pods/{name}")).await
}

/// Fetches current metrics of the node `name`.\
/// **Note** that it never fails, any problem is reported as [`MetricsSample::Unavailable`].
pub async fn node_metrics(client: Client, name: &str) -> MetricsSample {
    if !is_valid_name(name) {
        return MetricsSample::Unavailable(INVALID_NAME.to_owned());
    }

    fetch(client, format!("{METRICS_API}/nodes/{name}")).await
}

async fn fetch(client: Client, path: String) -> MetricsSample {
    let request = match http::Request::get(path.as_str()).body(Vec::new()) {
        Ok(request) => request,
        Err(err) => {
            debug!("cannot build metrics request for {}: {}", path, err);
            return MetricsSample::Unavailable(NOT_AVAILABLE.to_owned());
        },
    };

    let text = match client.request_text(request).await {
        Ok(text) => text,
        Err(err) => {
            debug!("metrics not available at {}: {}", path, err);
            return MetricsSample::Unavailable(NOT_AVAILABLE.to_owned());
        },
    };

    match from_str::<Value>(&text) {
        Ok(value) => MetricsSample::Available(value),
        Err(err) => {
            debug!("cannot parse metrics from {}: {}", path, err);
            MetricsSample::Unavailable(PARSE_FAILED.to_owned())
        },
    }
}
