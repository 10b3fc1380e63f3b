//! Backend commands queued from UI to backend worker.

use client_core::AnalysisTicket;

#[derive(Debug)]
pub enum BackendCommand {
    LoadCatalog,
    Analyze(AnalysisTicket),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadCatalog => "load_catalog",
            BackendCommand::Analyze(_) => "analyze",
        }
    }
}
