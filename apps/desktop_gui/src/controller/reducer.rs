//! Page-level controller state: catalog loading composed with the prediction workflow.

use client_core::{CatalogLoader, PredictionWorkflow};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    NotRequested,
    Pending,
    Ready,
    Failed,
}

#[derive(Debug)]
pub struct DashboardState {
    pub workflow: PredictionWorkflow,
    pub catalog_status: CatalogStatus,
    /// Blocking startup failure. Never set by analysis failures.
    pub startup_alert: Option<UiError>,
    pub status: String,
    catalog_loader: CatalogLoader,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            workflow: PredictionWorkflow::new(),
            catalog_status: CatalogStatus::NotRequested,
            startup_alert: None,
            status: "Starting".to_string(),
            catalog_loader: CatalogLoader::default(),
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog request for page mount; `None` after the first call.
    pub fn start(&mut self) -> Option<BackendCommand> {
        if !self.catalog_loader.begin() {
            return None;
        }
        self.catalog_status = CatalogStatus::Pending;
        self.status = "Loading heart sound samples".to_string();
        Some(BackendCommand::LoadCatalog)
    }

    pub fn form_enabled(&self) -> bool {
        self.startup_alert.is_none() && self.catalog_status == CatalogStatus::Ready
    }

    pub fn can_analyze(&self) -> bool {
        self.form_enabled() && self.workflow.can_analyze()
    }

    /// True while a backend reply is expected.
    pub fn awaiting_backend(&self) -> bool {
        self.catalog_status == CatalogStatus::Pending || self.workflow.outcome().is_loading()
    }

    pub fn request_analysis(&mut self) -> Option<BackendCommand> {
        if !self.form_enabled() {
            return None;
        }
        let ticket = self.workflow.begin_analysis()?;
        self.status = "Analyzing".to_string();
        Some(BackendCommand::Analyze(ticket))
    }

    /// Unwinds a command the backend worker never received.
    pub fn command_rejected(&mut self, cmd: BackendCommand) {
        match cmd {
            BackendCommand::LoadCatalog => {
                self.fail_catalog(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    self.status.clone(),
                ));
            }
            BackendCommand::Analyze(ticket) => {
                let reason = self.status.clone();
                self.workflow.abandon(ticket.id, &reason);
            }
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::CatalogLoaded(catalog) => {
                let count = catalog.len();
                if self.workflow.install_catalog(catalog) {
                    self.catalog_status = CatalogStatus::Ready;
                    self.status = if count == 0 {
                        "No heart sound samples available".to_string()
                    } else {
                        format!("{count} heart sound samples available")
                    };
                }
            }
            UiEvent::CatalogFailed(error) => self.fail_catalog(error),
            UiEvent::AnalysisFinished { ticket_id, result } => {
                if self.workflow.complete(ticket_id, result) {
                    self.status = "Analysis complete".to_string();
                }
            }
        }
    }

    fn fail_catalog(&mut self, error: UiError) {
        tracing::error!(
            context = ?error.context(),
            category = ?error.category(),
            "startup failure: {}",
            error.message()
        );
        self.catalog_status = CatalogStatus::Failed;
        self.status = "Backend unavailable".to_string();
        if self.startup_alert.is_none() {
            self.startup_alert = Some(error);
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
