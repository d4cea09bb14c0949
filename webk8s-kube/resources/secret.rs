use k8s_openapi::api::core::v1::Secret;
use serde::Serialize;

/// Status summary of the `secret` kubernetes resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretSummary {
    #[serde(rename = "type")]
    pub type_: String,
}

impl From<&Secret> for SecretSummary {
    fn from(secret: &Secret) -> Self {
        Self {
            type_: secret.type_.clone().unwrap_or_default(),
        }
    }
}
