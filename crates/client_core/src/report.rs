//! Presentation model for the diagnosis report and the analyze button.

use crate::workflow::AnalysisOutcome;

pub const PLACEHOLDER_TEXT: &str = "Start an analysis...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Favorable,
    Unfavorable,
}

pub fn classify_label(label: &str) -> Verdict {
    if label.to_lowercase() == "normal" {
        Verdict::Favorable
    } else {
        Verdict::Unfavorable
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportView {
    Placeholder,
    InProgress,
    Result { headline: String, verdict: Verdict },
    Failed { message: String },
}

impl ReportView {
    pub fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Idle => ReportView::Placeholder,
            AnalysisOutcome::Loading => ReportView::InProgress,
            AnalysisOutcome::Success { label } => ReportView::Result {
                headline: label.to_uppercase(),
                verdict: classify_label(label),
            },
            AnalysisOutcome::Error { message } => ReportView::Failed {
                message: message.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeButton {
    pub label: &'static str,
    pub enabled: bool,
    pub busy: bool,
}

impl AnalyzeButton {
    /// `can_analyze` is the caller's full gate; a loading outcome always disables.
    pub fn for_outcome(can_analyze: bool, outcome: &AnalysisOutcome) -> Self {
        let busy = outcome.is_loading();
        Self {
            label: if busy { "ANALYZING..." } else { "START ANALYSIS" },
            enabled: can_analyze && !busy,
            busy,
        }
    }
}
