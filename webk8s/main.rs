use anyhow::Result;
use clap::Parser;
use server::AppState;
use std::sync::Arc;
use tokio::runtime::Builder;
use tracing::{error, info};
use webk8s_config::{APP_NAME, APP_VERSION, Config};
use webk8s_kube::ClusterClientProvider;

pub mod cli;
pub mod server;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let _logging_guard = webk8s_common::logging::initialize(APP_NAME, args.log_dir.as_deref())?;
    info!("{} v{} started", APP_NAME, APP_VERSION);

    if let Err(error) = run_server(&args) {
        error!("{} v{} terminated with an error: {}", APP_NAME, APP_VERSION, error);
        Err(error)
    } else {
        info!("{} v{} stopped", APP_NAME, APP_VERSION);
        Ok(())
    }
}

fn run_server(args: &cli::Args) -> Result<()> {
    let rt = Builder::new_multi_thread().enable_all().build()?;

    rt.block_on(async {
        let mut config = Config::load_or_default(args.config.as_deref()).await?;
        args.apply(&mut config);

        let provider = Arc::new(ClusterClientProvider::new(args.client_options(&config)));
        provider.handle().await?;

        server::serve(AppState::new(provider, config)).await
    })
}
