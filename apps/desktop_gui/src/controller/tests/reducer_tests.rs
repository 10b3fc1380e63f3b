use super::*;
use client_core::{
    AnalysisOutcome, ClientError, Prediction, SampleCatalog, ANALYSIS_FAILED_MESSAGE,
};
use shared::{
    domain::{AuscultationSite, Gender, SampleId},
    protocol::AnalysisRequest,
};

use crate::controller::events::UiErrorCategory;

fn catalog(ids: &[&str]) -> SampleCatalog {
    SampleCatalog::from_ids(ids.iter().copied().map(SampleId::from))
}

fn loaded_state(ids: &[&str]) -> DashboardState {
    let mut state = DashboardState::new();
    state.start().expect("catalog command");
    state.apply(UiEvent::CatalogLoaded(catalog(ids)));
    state
}

fn ticket_of(cmd: BackendCommand) -> client_core::AnalysisTicket {
    match cmd {
        BackendCommand::Analyze(ticket) => ticket,
        other => panic!("expected analyze command, got {other:?}"),
    }
}

#[test]
fn catalog_is_requested_once() {
    let mut state = DashboardState::new();
    assert!(matches!(state.start(), Some(BackendCommand::LoadCatalog)));
    assert!(state.start().is_none());
    assert_eq!(state.catalog_status, CatalogStatus::Pending);
    assert!(state.awaiting_backend());
    assert!(!state.form_enabled());
}

#[test]
fn scenario_catalog_then_analyze_binds_form() {
    let mut state = loaded_state(&["s1", "s2"]);
    assert_eq!(state.workflow.selected_sample(), Some(&SampleId::from("s1")));

    state.workflow.set_gender(Gender::Female);
    state.workflow.set_site(AuscultationSite::Apex);
    let ticket = ticket_of(state.request_analysis().expect("analyze"));

    assert_eq!(
        ticket.request,
        AnalysisRequest {
            gender: Gender::Female,
            location: AuscultationSite::Apex,
            sample_id: SampleId::from("s1"),
        }
    );
    assert_eq!(state.workflow.outcome(), &AnalysisOutcome::Loading);
    assert!(state.request_analysis().is_none());
}

#[test]
fn empty_catalog_keeps_analyze_inert() {
    let mut state = loaded_state(&[]);
    assert!(state.form_enabled());
    assert!(!state.can_analyze());
    assert!(state.request_analysis().is_none());
    assert_eq!(state.workflow.outcome(), &AnalysisOutcome::Idle);
}

#[test]
fn prediction_failure_stays_inline_and_retryable() {
    let mut state = loaded_state(&["s1"]);
    let ticket = ticket_of(state.request_analysis().expect("analyze"));

    state.apply(UiEvent::AnalysisFinished {
        ticket_id: ticket.id,
        result: Err(ClientError::MalformedBody("connection reset".into())),
    });

    assert_eq!(
        state.workflow.outcome(),
        &AnalysisOutcome::Error {
            message: ANALYSIS_FAILED_MESSAGE.to_string()
        }
    );
    assert!(state.startup_alert.is_none());
    assert!(state.can_analyze());
}

#[test]
fn prediction_success_is_applied() {
    let mut state = loaded_state(&["s1"]);
    let ticket = ticket_of(state.request_analysis().expect("analyze"));

    state.apply(UiEvent::AnalysisFinished {
        ticket_id: ticket.id,
        result: Ok(Prediction {
            label: "Normal".to_string(),
            sound_id: None,
        }),
    });

    assert_eq!(state.workflow.outcome().label(), Some("Normal"));
    assert!(!state.awaiting_backend());
}

#[test]
fn catalog_failure_raises_blocking_alert() {
    let mut state = DashboardState::new();
    state.start().expect("catalog command");
    state.apply(UiEvent::CatalogFailed(UiError::from_message(
        UiErrorContext::CatalogLoad,
        "connection refused",
    )));

    let alert = state.startup_alert.as_ref().expect("alert");
    assert_eq!(alert.category(), UiErrorCategory::Transport);
    assert_eq!(state.catalog_status, CatalogStatus::Failed);
    assert!(!state.form_enabled());
    assert!(state.request_analysis().is_none());
    assert_eq!(state.workflow.outcome(), &AnalysisOutcome::Idle);
}

#[test]
fn rejected_analyze_command_fails_the_ticket() {
    let mut state = loaded_state(&["s1"]);
    let cmd = state.request_analysis().expect("analyze");
    state.status = "UI command queue is full; please retry".to_string();

    state.command_rejected(cmd);

    assert!(matches!(
        state.workflow.outcome(),
        AnalysisOutcome::Error { .. }
    ));
    assert!(state.startup_alert.is_none());
    assert!(state.can_analyze());
}

#[test]
fn rejected_catalog_command_is_a_startup_failure() {
    let mut state = DashboardState::new();
    let cmd = state.start().expect("catalog command");
    state.status = "Backend worker disconnected".to_string();

    state.command_rejected(cmd);

    assert_eq!(
        state.startup_alert.as_ref().map(UiError::context),
        Some(UiErrorContext::BackendStartup)
    );
}
