use anyhow::Result;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_error::ErrorLayer;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes logging and returns worker guard that will flush logs on drop.\
/// **Note** that logs are written to the standard output unless `log_dir` is provided,
/// in that case they go to the daily rolling file `{app_name}.log` inside that directory.
pub fn initialize(app_name: &str, log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let (writer, guard) = get_writer(app_name, log_dir);

    let timer = time::format_description::parse("[year]-[month padding:zero]-[day padding:zero] [hour]:[minute]:[second]")?;
    let time_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = tracing_subscriber::fmt::time::OffsetTime::new(time_offset, timer);

    let target = app_name.replace('-', "_");

    #[cfg(debug_assertions)]
    let env = format!("warn,{target}=debug,{target}_kube=debug,tower_http=debug");

    #[cfg(not(debug_assertions))]
    let env = format!("warn,{target}=info,{target}_kube=info");

    let env_filter = tracing_subscriber::filter::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new(env));

    #[cfg(debug_assertions)]
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_timer(timer)
        .with_ansi(log_dir.is_none())
        .with_writer(writer)
        .with_filter(env_filter);

    #[cfg(not(debug_assertions))]
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(true)
        .with_timer(timer)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(guard)
}

fn get_writer(app_name: &str, log_dir: Option<&Path>) -> (NonBlocking, WorkerGuard) {
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
            tracing_appender::non_blocking(appender)
        },
        None => tracing_appender::non_blocking(std::io::stdout()),
    }
}
