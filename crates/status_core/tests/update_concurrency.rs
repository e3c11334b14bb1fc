mod common;

use common::{init_logging, network_failure, only_request_id, records, step};
use status_core::{AppState, InputField, Msg, Operation, StatusRecord, UiState};

#[test]
fn submissions_are_rejected_while_loading() {
    init_logging();
    let (state, effects) = step(AppState::new(), Msg::SubmitSingle("+91111".into()));
    let request_id = only_request_id(&effects);

    for msg in [
        Msg::SubmitSingle("+91222".into()),
        Msg::SubmitBulk("+91333".into()),
        Msg::RefreshClicked,
        Msg::Submitted(InputField::Single),
    ] {
        let (next, effects) = step(state.clone(), msg);
        assert!(effects.is_empty());
        assert_eq!(next, state);
    }

    assert_eq!(state.in_flight(), Some((request_id, Operation::Lookup)));
}

#[test]
fn inputs_are_disabled_while_loading() {
    init_logging();
    let (state, _) = step(AppState::new(), Msg::RefreshClicked);
    assert!(!state.view().inputs_enabled);

    let (state, _) = step(
        state,
        Msg::InputChanged {
            field: InputField::Single,
            text: "+91".into(),
        },
    );
    assert_eq!(state.input(InputField::Single), "");
}

#[test]
fn loading_is_true_exactly_while_one_request_is_in_flight() {
    init_logging();
    let state = AppState::new();
    assert!(!state.view().loading);

    let (state, effects) = step(state, Msg::RefreshClicked);
    assert!(state.view().loading);
    let request_id = only_request_id(&effects);

    let (state, _) = step(state, Msg::Tick);
    assert!(state.view().loading);

    let (state, _) = step(
        state,
        Msg::ScanCompleted {
            request_id,
            result: Err(network_failure("timeout")),
        },
    );
    assert!(!state.view().loading);
    assert!(state.view().inputs_enabled);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, effects) = step(AppState::new(), Msg::RefreshClicked);
    let request_id = only_request_id(&effects);

    let (state, _) = step(
        state,
        Msg::ScanCompleted {
            request_id: request_id + 10,
            result: Ok(records()),
        },
    );
    assert!(state.view().loading);
    assert!(state.results().is_empty());

    // Right id, wrong operation.
    let (state, _) = step(
        state,
        Msg::LookupCompleted {
            request_id,
            result: Ok(StatusRecord::new("+91", "x", "#000000")),
        },
    );
    assert!(state.view().loading);
    assert!(state.notice().is_none());
}

#[test]
fn completion_without_request_in_flight_is_ignored() {
    init_logging();
    let (state, _) = step(
        AppState::new(),
        Msg::BulkCompleted {
            request_id: 1,
            result: Ok("null".into()),
        },
    );
    assert_eq!(state.ui_state(), &UiState::Idle);
    assert_eq!(state.view().message, None);
}

#[test]
fn request_ids_are_monotonic() {
    init_logging();
    let mut state = AppState::new();
    assert_eq!(state.last_request_id(), None);
    let mut seen = Vec::new();
    for _ in 0..3 {
        let (next, effects) = step(state, Msg::RefreshClicked);
        let request_id = only_request_id(&effects);
        assert_eq!(next.last_request_id(), Some(request_id));
        seen.push(request_id);
        let (next, _) = step(
            next,
            Msg::ScanCompleted {
                request_id,
                result: Ok(Vec::new()),
            },
        );
        state = next;
    }
    assert_eq!(seen, vec![1, 2, 3]);
}
