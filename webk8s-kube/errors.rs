use std::time::Duration;

use crate::ClientError;

/// Possible errors from querying the Kubernetes cluster.
#[derive(thiserror::Error, Debug)]
pub enum ClusterError {
    /// Requested resource kind is not one of the supported ones.
    #[error("unsupported resource type: {0}")]
    UnsupportedKind(String),

    /// Kubernetes client is not available.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Kubernetes API request failed.
    #[error(transparent)]
    Kube(#[from] kube::Error),

    /// Kubernetes API request did not finish in time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl ClusterError {
    /// Returns `true` if error was caused by the caller input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ClusterError::UnsupportedKind(_))
    }
}
