mod app;
mod config;
mod controls;
mod error;
mod feed;
mod graph;
mod logging;
mod scene;
mod session;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::config::ViewerConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph snapshot JSON, re-read on every feed tick.
    #[arg(long, default_value = "fixtures/structure.json")]
    snapshot: PathBuf,

    /// Optional viewer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a daily rolling log file into this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Tracing filter directive, overriding RUST_LOG.
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init_logging(args.log_filter.as_deref(), args.log_dir.as_deref())?;

    let config = ViewerConfig::load_or_default(args.config.as_deref())?;
    tracing::debug!(?config, "viewer config loaded");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    let snapshot = args.snapshot;
    eframe::run_native(
        "graph-walk",
        options,
        Box::new(move |cc| Ok(Box::new(app::GraphWalkApp::new(cc, config, snapshot)))),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}
