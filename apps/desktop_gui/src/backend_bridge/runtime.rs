//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{load_catalog, DiagnosisService, HeartGuardClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the worker thread that owns the tokio runtime and the HTTP client.
///
/// Commands are handled one at a time, so at most one network call is
/// outstanding.
pub fn launch(settings: &Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let base_url = settings.api_base_url.clone();
    let timeout = settings.request_timeout();

    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::CatalogFailed(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };

        let client = match HeartGuardClient::new(&base_url, timeout) {
            Ok(client) => client,
            Err(err) => {
                tracing::error!("failed to build HeartGuard client for {base_url}: {err}");
                let _ = ui_tx.try_send(UiEvent::CatalogFailed(UiError::from_client_error(
                    UiErrorContext::BackendStartup,
                    &err,
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            while let Ok(cmd) = cmd_rx.recv() {
                let event = handle_command(&client, cmd).await;
                if ui_tx.send(event).is_err() {
                    tracing::info!("ui event queue closed; backend worker exiting");
                    break;
                }
            }
        });
    });
}

pub async fn handle_command<S>(service: &S, cmd: BackendCommand) -> UiEvent
where
    S: DiagnosisService + ?Sized,
{
    match cmd {
        BackendCommand::LoadCatalog => {
            tracing::info!("backend: load_catalog");
            match load_catalog(service).await {
                Ok(catalog) => UiEvent::CatalogLoaded(catalog),
                Err(err) => UiEvent::CatalogFailed(UiError::from_client_error(
                    UiErrorContext::CatalogLoad,
                    &err,
                )),
            }
        }
        BackendCommand::Analyze(ticket) => {
            tracing::info!(
                ticket = ticket.id,
                sample_id = %ticket.request.sample_id,
                location = %ticket.request.location,
                gender = ticket.request.gender.code(),
                "backend: analyze"
            );
            let result = service.predict(&ticket.request).await;
            UiEvent::AnalysisFinished {
                ticket_id: ticket.id,
                result,
            }
        }
    }
}
