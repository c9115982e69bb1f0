//! Console logging, plus a daily rolling file when a log directory is given.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,graph_walk=debug";

/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the program.
pub fn init_logging(filter: Option<&str>, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = match filter {
        Some(filter) => EnvFilter::try_new(filter)
            .with_context(|| format!("invalid log filter {filter:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let console_layer = fmt::layer().with_target(true).with_thread_ids(false);

    let (file_layer, guard) = match log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
            let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "graph-walk.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(
        log_dir = ?log_dir,
        "logging initialized"
    );
    Ok(guard)
}
