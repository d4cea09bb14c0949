use serde::Deserialize;
use webk8s_kube::utils::is_valid_name;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct ResourcesQuery {
    pub namespace: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PodQuery {
    pub namespace: Option<String>,
    pub pod: Option<String>,
}

impl PodQuery {
    /// Returns validated namespace and pod name.
    pub fn validate(&self) -> Result<(&str, &str), ApiError> {
        match (non_empty(&self.namespace), non_empty(&self.pod)) {
            (Some(namespace), Some(pod)) => Ok((valid_name(namespace, "namespace")?, valid_name(pod, "pod")?)),
            _ => Err(ApiError::MissingParameters("namespace and pod")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NodeQuery {
    pub node: Option<String>,
}

impl NodeQuery {
    pub fn validate(&self) -> Result<&str, ApiError> {
        valid_name(required(&self.node, "node")?, "node")
    }
}

#[derive(Debug, Deserialize)]
pub struct ServiceQuery {
    pub namespace: Option<String>,
    pub service: Option<String>,
}

impl ServiceQuery {
    pub fn validate(&self) -> Result<(&str, &str), ApiError> {
        match (non_empty(&self.namespace), non_empty(&self.service)) {
            (Some(namespace), Some(service)) => Ok((
                valid_name(namespace, "namespace")?,
                valid_name(service, "service")?,
            )),
            _ => Err(ApiError::MissingParameters("namespace and service")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfigMapQuery {
    pub namespace: Option<String>,
    pub configmap: Option<String>,
}

impl ConfigMapQuery {
    pub fn validate(&self) -> Result<(&str, &str), ApiError> {
        match (non_empty(&self.namespace), non_empty(&self.configmap)) {
            (Some(namespace), Some(configmap)) => Ok((
                valid_name(namespace, "namespace")?,
                valid_name(configmap, "configmap")?,
            )),
            _ => Err(ApiError::MissingParameters("namespace and configmap")),
        }
    }
}

/// Returns value of the required parameter `name`, or error if it is missing or empty.
pub fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, ApiError> {
    non_empty(value).ok_or(ApiError::MissingParameter(name))
}

/// Returns `value` if it is a valid kubernetes object name.
pub fn valid_name<'a>(value: &'a str, name: &'static str) -> Result<&'a str, ApiError> {
    if is_valid_name(value) {
        Ok(value)
    } else {
        Err(ApiError::InvalidName(name))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
