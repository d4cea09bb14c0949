use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

#[cfg(test)]
#[path = "./client.tests.rs"]
mod client_tests;

/// Possible errors from building kubernetes client.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Failed to process kube configuration.
    #[error("failed to process kube configuration: {0}")]
    KubeconfigError(#[from] kube::config::KubeconfigError),

    /// Failed to discover ambient cluster credentials.
    #[error("failed to discover cluster credentials: {0}")]
    InferConfigError(#[from] kube::config::InferConfigError),

    /// Failed to build kubernetes client.
    #[error("failed to build kubernetes client: {0}")]
    KubeError(#[from] kube::Error),
}

/// Options for building kubernetes client.
#[derive(Debug, Default, Clone)]
pub struct ClientOptions {
    /// Path to the kubeconfig file, ambient credentials are used when both this and `context` are `None`.
    pub kube_config_path: Option<String>,

    /// Context to use from the kubeconfig file.
    pub context: Option<String>,

    /// Skip TLS certificate verification.
    pub allow_insecure: bool,
}

/// Shared, read-only access to the kubernetes cluster.
pub struct ClusterHandle {
    client: Client,
    metrics_client: Client,
    logs_client: Client,
    connection: Option<Config>,
}

impl ClusterHandle {
    /// Creates new [`ClusterHandle`] from the credentials described by `options`.
    pub async fn connect(options: &ClientOptions) -> Result<Self, ClientError> {
        let mut config = get_config(options).await?;
        if options.allow_insecure {
            config.accept_invalid_certs = true;
        }

        let client = Client::try_from(config.clone())?;
        let metrics_client = Client::try_from(config.clone())?;
        let logs_client = Client::try_from(streaming_config(&config))?;

        Ok(Self {
            client,
            metrics_client,
            logs_client,
            connection: Some(config),
        })
    }

    /// Creates new [`ClusterHandle`] around an existing client.\
    /// **Note** that the same client is used for the metrics API and log feeds, no connection parameters are exposed.
    pub fn from_client(client: Client) -> Self {
        Self {
            metrics_client: client.clone(),
            logs_client: client.clone(),
            client,
            connection: None,
        }
    }

    /// Returns cloned kubernetes client that can be consumed.
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Returns cloned auxiliary client used to query the metrics API group.
    pub fn metrics_client(&self) -> Client {
        self.metrics_client.clone()
    }

    /// Returns cloned client used for follow log feeds, its reads never time out.
    pub fn logs_client(&self) -> Client {
        self.logs_client.clone()
    }

    /// Returns raw connection parameters (cluster URL, auth and TLS settings) the clients were built from.
    pub fn connection(&self) -> Option<&Config> {
        self.connection.as_ref()
    }
}

/// Lazily constructs and memoizes the single [`ClusterHandle`] for the process lifetime.
pub struct ClusterClientProvider {
    options: ClientOptions,
    handle: OnceCell<Arc<ClusterHandle>>,
}

impl ClusterClientProvider {
    /// Creates new [`ClusterClientProvider`] instance, nothing is connected until first use.
    pub fn new(options: ClientOptions) -> Self {
        Self {
            options,
            handle: OnceCell::new(),
        }
    }

    /// Creates new [`ClusterClientProvider`] instance that already holds handle for the `client`.
    pub fn with_client(client: Client) -> Self {
        Self {
            options: ClientOptions::default(),
            handle: OnceCell::from(Arc::new(ClusterHandle::from_client(client))),
        }
    }

    /// Returns the shared [`ClusterHandle`], building it on first call.\
    /// **Note** that concurrent first callers wait for a single construction.
    pub async fn handle(&self) -> Result<Arc<ClusterHandle>, ClientError> {
        self.handle
            .get_or_try_init(|| async {
                let handle = ClusterHandle::connect(&self.options).await?;
                if let Some(config) = handle.connection() {
                    info!("Kubernetes client created for {}", config.cluster_url);
                }

                Ok::<_, ClientError>(Arc::new(handle))
            })
            .await
            .cloned()
    }

    /// Returns cloned primary kubernetes client.
    pub async fn client(&self) -> Result<Client, ClientError> {
        Ok(self.handle().await?.client())
    }

    /// Returns `true` if the handle was already built.
    pub fn is_initialized(&self) -> bool {
        self.handle.initialized()
    }
}

/// Returns copy of the `config` without the read timeout, so an idle follow feed stays open.
fn streaming_config(config: &Config) -> Config {
    let mut config = config.clone();
    config.read_timeout = None;
    config
}

/// Builds client configuration from ambient credentials or from the requested kubeconfig and context.
async fn get_config(options: &ClientOptions) -> Result<Config, ClientError> {
    if options.kube_config_path.is_none() && options.context.is_none() {
        return Ok(Config::infer().await?);
    }

    let kube_config = match options.kube_config_path.as_deref() {
        Some(path) => Kubeconfig::read_from(path)?,
        None => Kubeconfig::read()?,
    };
    let kube_config_options = KubeConfigOptions {
        context: options.context.clone(),
        ..Default::default()
    };

    Ok(Config::from_custom_kubeconfig(kube_config, &kube_config_options).await?)
}
