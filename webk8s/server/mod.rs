use axum::Router;
use axum::routing::get;
use kube::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;
use webk8s_config::Config;
use webk8s_kube::{ClusterClientProvider, ClusterError};

pub use self::errors::ApiError;

mod errors;
mod handlers;
mod logs;
mod params;

#[cfg(test)]
#[path = "./server.tests.rs"]
mod server_tests;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    provider: Arc<ClusterClientProvider>,
    config: Arc<Config>,
}

impl AppState {
    /// Creates new [`AppState`] instance.
    pub fn new(provider: Arc<ClusterClientProvider>, config: Config) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns primary kubernetes client.
    pub async fn client(&self) -> Result<Client, ClusterError> {
        Ok(self.provider.client().await?)
    }

    /// Returns kubernetes client for the metrics API group.
    pub async fn metrics_client(&self) -> Result<Client, ClusterError> {
        Ok(self.provider.handle().await?.metrics_client())
    }

    /// Returns kubernetes client for follow log feeds.
    pub async fn logs_client(&self) -> Result<Client, ClusterError> {
        Ok(self.provider.handle().await?.logs_client())
    }
}

/// Builds application router with API endpoints and the dashboard UI files.
pub fn router(state: AppState) -> Router {
    let assets = state.config.server.assets.clone();

    Router::new()
        .route("/api/namespaces", get(handlers::namespaces))
        .route("/api/resources/types", get(handlers::resource_types))
        .route("/api/resources", get(handlers::resources))
        .route("/api/pod", get(handlers::pod))
        .route("/api/pod/containers", get(handlers::pod_containers))
        .route("/api/pod/events", get(handlers::pod_events))
        .route("/api/pod/metrics", get(handlers::pod_metrics))
        .route("/api/node", get(handlers::node))
        .route("/api/node/metrics", get(handlers::node_metrics))
        .route("/api/service", get(handlers::service))
        .route("/api/configmap", get(handlers::config_map))
        .route("/api/logs/stream", get(logs::stream))
        .route_service("/", ServeFile::new(assets.join("index.html")))
        .route_service("/logs.html", ServeFile::new(assets.join("logs.html")))
        .nest_service("/assets", ServeDir::new(assets.join("assets")))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener and serves requests until the server fails.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let address = SocketAddr::new(state.config.server.address, state.config.server.port);
    let listener = TcpListener::bind(address).await?;
    info!("serving dashboard on http://{}", address);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
