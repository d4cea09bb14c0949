use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, warn};
use webk8s_kube::ClusterError;

/// Possible errors from handling API requests.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Single required query parameter is missing or empty.
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    /// Some of the required query parameters are missing or empty.
    #[error("{0} parameters are required")]
    MissingParameters(&'static str),

    /// Object name contains forbidden characters.
    #[error("invalid {0} name")]
    InvalidName(&'static str),

    /// Cluster request failed or was rejected.
    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

impl ApiError {
    /// Returns HTTP status code for the error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Cluster(error) if !error.is_input_error() => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_client_error() {
            debug!("request rejected: {}", self);
        } else {
            warn!("request failed: {}", self);
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
