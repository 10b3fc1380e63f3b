//! Prediction workflow: form state plus the analyze request lifecycle.
//!
//! The outcome moves `Idle -> Loading -> Success | Error` and re-enters
//! `Loading` on every later analyze. Each analyze binds the form fields into an
//! [`AnalysisTicket`] at the moment it fires, so edits made while a request is
//! in flight never reach that request.

use shared::{
    domain::{AuscultationSite, Gender, SampleId},
    protocol::AnalysisRequest,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{catalog::SampleCatalog, ClientError, DiagnosisService, Prediction};

pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisOutcome {
    #[default]
    Idle,
    Loading,
    Success {
        label: String,
    },
    Error {
        message: String,
    },
}

impl AnalysisOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, AnalysisOutcome::Loading)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Success { label } => Some(label),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub sample: Option<SampleId>,
    pub gender: Gender,
    pub site: AuscultationSite,
}

impl FormState {
    fn snapshot(&self) -> Option<AnalysisRequest> {
        let sample_id = self.sample.clone()?;
        Some(AnalysisRequest {
            gender: self.gender,
            location: self.site,
            sample_id,
        })
    }
}

/// Request bound at submission time, tagged so its completion can be matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub id: u64,
    pub request: AnalysisRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("sample {0} is not in the loaded catalog")]
    UnknownSample(SampleId),
}

#[derive(Debug, Default)]
pub struct PredictionWorkflow {
    catalog: Option<SampleCatalog>,
    form: FormState,
    outcome: AnalysisOutcome,
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl PredictionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the startup catalog and selects its first sample.
    ///
    /// Returns `false` and leaves state untouched if a catalog is already
    /// installed; the catalog is immutable for the session.
    pub fn install_catalog(&mut self, catalog: SampleCatalog) -> bool {
        if self.catalog.is_some() {
            warn!("ignoring second sample catalog for this session");
            return false;
        }
        self.form.sample = catalog.first().cloned();
        self.catalog = Some(catalog);
        true
    }

    pub fn catalog(&self) -> Option<&SampleCatalog> {
        self.catalog.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn selected_sample(&self) -> Option<&SampleId> {
        self.form.sample.as_ref()
    }

    pub fn outcome(&self) -> &AnalysisOutcome {
        &self.outcome
    }

    pub fn select_sample(&mut self, id: SampleId) -> Result<(), WorkflowError> {
        match &self.catalog {
            Some(catalog) if catalog.contains(&id) => {
                self.form.sample = Some(id);
                Ok(())
            }
            _ => Err(WorkflowError::UnknownSample(id)),
        }
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.form.gender = gender;
    }

    pub fn set_site(&mut self, site: AuscultationSite) {
        self.form.site = site;
    }

    pub fn can_analyze(&self) -> bool {
        self.form.sample.is_some() && !self.outcome.is_loading()
    }

    /// Starts an analysis, or returns `None` when the action is inert.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        if !self.can_analyze() {
            return None;
        }
        let request = self.form.snapshot()?;
        self.next_ticket += 1;
        let id = self.next_ticket;
        self.in_flight = Some(id);
        self.outcome = AnalysisOutcome::Loading;
        debug!(ticket = id, sample_id = %request.sample_id, "analysis started");
        Some(AnalysisTicket { id, request })
    }

    /// Applies the result of ticket `ticket_id`. Results for any other ticket
    /// are ignored and `false` is returned.
    pub fn complete(&mut self, ticket_id: u64, result: Result<Prediction, ClientError>) -> bool {
        if !self.is_in_flight(ticket_id) {
            debug!(ticket = ticket_id, "ignoring stale analysis result");
            return false;
        }
        let outcome = match result {
            Ok(prediction) => {
                info!(ticket = ticket_id, label = %prediction.label, "analysis finished");
                AnalysisOutcome::Success {
                    label: prediction.label,
                }
            }
            Err(err) => {
                warn!(ticket = ticket_id, error = %err, "analysis failed");
                Self::failed()
            }
        };
        self.settle(outcome);
        true
    }

    /// Fails ticket `ticket_id` without a service response, e.g. when the
    /// request could not be handed to the network worker.
    pub fn abandon(&mut self, ticket_id: u64, reason: &str) -> bool {
        if !self.is_in_flight(ticket_id) {
            return false;
        }
        warn!(ticket = ticket_id, reason, "analysis abandoned");
        self.settle(Self::failed());
        true
    }

    fn is_in_flight(&self, ticket_id: u64) -> bool {
        self.in_flight == Some(ticket_id)
    }

    fn settle(&mut self, outcome: AnalysisOutcome) {
        self.in_flight = None;
        self.outcome = outcome;
    }

    fn failed() -> AnalysisOutcome {
        AnalysisOutcome::Error {
            message: ANALYSIS_FAILED_MESSAGE.to_string(),
        }
    }

    /// Runs one full analyze action against `service`.
    pub async fn analyze<S>(&mut self, service: &S) -> Option<&AnalysisOutcome>
    where
        S: DiagnosisService + ?Sized,
    {
        let ticket = self.begin_analysis()?;
        let result = service.predict(&ticket.request).await;
        self.complete(ticket.id, result);
        Some(&self.outcome)
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
