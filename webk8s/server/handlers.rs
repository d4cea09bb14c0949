use axum::Json;
use axum::extract::{Query, State};
use k8s_openapi::api::core::v1::Event;
use webk8s_kube::details::{self, ConfigMapDetail, NodeDetail, PodContainers, PodDetail, ServiceDetail};
use webk8s_kube::metrics::{self, MetricsSample};
use webk8s_kube::resources::list_kind;
use webk8s_kube::{RESOURCE_KINDS, ResourceKind, ResourceRow, list_namespaces};

use super::params::{ConfigMapQuery, NodeQuery, PodQuery, ResourcesQuery, ServiceQuery, required, valid_name};
use super::{ApiError, AppState};

pub async fn namespaces(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let client = state.client().await?;
    let timeout = state.config().cluster.namespaces_timeout();

    Ok(Json(list_namespaces(client, timeout).await?))
}

pub async fn resource_types() -> Json<&'static [ResourceKind]> {
    Json(&RESOURCE_KINDS)
}

/// Lists resources of the requested type.\
/// **Note** that namespace is required for every kind except nodes.
pub async fn resources(
    State(state): State<AppState>,
    Query(query): Query<ResourcesQuery>,
) -> Result<Json<Vec<ResourceRow>>, ApiError> {
    let kind = required(&query.kind, "type")?.parse::<ResourceKind>()?;
    let namespace = if kind.is_namespaced() {
        valid_name(required(&query.namespace, "namespace")?, "namespace")?
    } else {
        ""
    };

    let client = state.client().await?;
    Ok(Json(list_kind(client, namespace, kind).await?))
}

pub async fn pod(State(state): State<AppState>, Query(query): Query<PodQuery>) -> Result<Json<PodDetail>, ApiError> {
    let (namespace, pod) = query.validate()?;
    let client = state.client().await?;

    Ok(Json(details::pod_detail(client, namespace, pod).await?))
}

pub async fn pod_containers(
    State(state): State<AppState>,
    Query(query): Query<PodQuery>,
) -> Result<Json<PodContainers>, ApiError> {
    let (namespace, pod) = query.validate()?;
    let client = state.client().await?;

    Ok(Json(details::pod_containers(client, namespace, pod).await?))
}

pub async fn pod_events(
    State(state): State<AppState>,
    Query(query): Query<PodQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let (namespace, pod) = query.validate()?;
    let client = state.client().await?;

    Ok(Json(details::pod_events(client, namespace, pod).await?))
}

pub async fn pod_metrics(
    State(state): State<AppState>,
    Query(query): Query<PodQuery>,
) -> Result<Json<MetricsSample>, ApiError> {
    let (namespace, pod) = query.validate()?;
    let client = state.metrics_client().await?;

    Ok(Json(metrics::pod_metrics(client, namespace, pod).await))
}

pub async fn node(State(state): State<AppState>, Query(query): Query<NodeQuery>) -> Result<Json<NodeDetail>, ApiError> {
    let node = query.validate()?;
    let client = state.client().await?;

    Ok(Json(details::node_detail(client, node).await?))
}

pub async fn node_metrics(
    State(state): State<AppState>,
    Query(query): Query<NodeQuery>,
) -> Result<Json<MetricsSample>, ApiError> {
    let node = query.validate()?;
    let client = state.metrics_client().await?;

    Ok(Json(metrics::node_metrics(client, node).await))
}

pub async fn service(
    State(state): State<AppState>,
    Query(query): Query<ServiceQuery>,
) -> Result<Json<ServiceDetail>, ApiError> {
    let (namespace, service) = query.validate()?;
    let client = state.client().await?;

    Ok(Json(details::service_detail(client, namespace, service).await?))
}

pub async fn config_map(
    State(state): State<AppState>,
    Query(query): Query<ConfigMapQuery>,
) -> Result<Json<ConfigMapDetail>, ApiError> {
    let (namespace, config_map) = query.validate()?;
    let client = state.client().await?;

    Ok(Json(details::config_map_detail(client, namespace, config_map).await?))
}
