use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use webk8s_config::Config;
use webk8s_kube::ClientOptions;

#[cfg(test)]
#[path = "./cli.tests.rs"]
mod cli_tests;

/// webk8s is a read-only web dashboard for Kubernetes clusters.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file (defaults to $HOME/.webk8s/config.yaml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address the HTTP server binds to.
    #[arg(long)]
    pub address: Option<IpAddr>,

    /// Port the HTTP server listens on.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory with the dashboard UI files.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Path to the kubeconfig file (ambient credentials are used when not set).
    #[arg(long, env = "KUBECONFIG")]
    pub kube_config: Option<String>,

    /// Context to use from the kubeconfig file.
    #[arg(long)]
    pub context: Option<String>,

    /// Skip TLS certificate verification (insecure).
    #[arg(long)]
    pub insecure: bool,

    /// Write logs to a daily rolling file in this directory instead of the standard output.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Overrides values of the `config` with the ones provided on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(address) = self.address {
            config.server.address = address;
        }

        if let Some(port) = self.port {
            config.server.port = port;
        }

        if let Some(assets) = &self.assets {
            config.server.assets = assets.clone();
        }

        config.cluster.insecure |= self.insecure;
    }

    /// Returns options for building kubernetes client.
    pub fn client_options(&self, config: &Config) -> ClientOptions {
        ClientOptions {
            kube_config_path: self.kube_config.clone(),
            context: self.context.clone(),
            allow_insecure: config.cluster.insecure,
        }
    }
}
