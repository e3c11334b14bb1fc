#![allow(dead_code)]

use std::sync::Once;

use status_core::{
    update, AppState, Effect, FailureCause, FailureGate, FixedFailureGate, Msg, RequestFailure,
    RequestId, StatusRecord,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(status_logging::initialize_for_tests);
}

pub fn step(state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    update(state, msg, &mut FixedFailureGate::never())
}

pub fn step_with(state: AppState, msg: Msg, gate: &mut dyn FailureGate) -> (AppState, Vec<Effect>) {
    update(state, msg, gate)
}

pub fn only_request_id(effects: &[Effect]) -> RequestId {
    assert_eq!(effects.len(), 1, "expected exactly one effect, got {effects:?}");
    effects[0].request_id()
}

pub fn network_failure(detail: &str) -> RequestFailure {
    RequestFailure::new(FailureCause::Network, detail)
}

pub fn records() -> Vec<StatusRecord> {
    vec![
        StatusRecord::new("+91111", "negative", "#00FF00"),
        StatusRecord::new("+91222", "pending", "#FFFFFF"),
        StatusRecord::new("+91333", "high risk", "#FF0000"),
    ]
}

/// Runs a successful refresh returning `records()` with a non-triggering gate.
pub fn with_results(state: AppState) -> AppState {
    let (state, effects) = step(state, Msg::RefreshClicked);
    let request_id = only_request_id(&effects);
    let (state, _) = step(
        state,
        Msg::ScanCompleted {
            request_id,
            result: Ok(records()),
        },
    );
    assert_eq!(state.results().len(), 3);
    state
}
