mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::Endpoints;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{load_settings, Args};
use crate::controller::events::UiEvent;
use crate::ui::HeartGuardApp;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args)?;

    let (filter, bad_filter) = match EnvFilter::try_new(&settings.log_filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Some(err) = bad_filter {
        tracing::warn!(filter = %settings.log_filter, error = %err, "ignoring invalid log filter");
    }
    settings.log_rejected();

    let endpoints = Endpoints::parse(&settings.api_base_url)
        .with_context(|| format!("invalid api base url {:?}", settings.api_base_url))?;
    tracing::info!(
        api_base_url = %endpoints.base(),
        timeout_secs = settings.request_timeout_secs,
        "starting HeartGuard client"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(&settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HeartGuard")
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([520.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "HeartGuard",
        options,
        Box::new(move |_cc| Ok(Box::new(HeartGuardApp::new(cmd_tx, ui_rx, endpoints)))),
    )
    .map_err(|err| anyhow!("HeartGuard window failed: {err}"))
}
