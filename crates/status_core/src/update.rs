use status_logging::{set_current_request, status_debug, status_error, status_info, status_warn};

use crate::{
    AppState, Effect, FailureCause, FailureGate, InputField, LookupNotice, Msg, Operation,
    RequestFailure, RequestId, ResultSet, UiState, BULK_ACCEPTED, GENERIC_ERROR,
};

/// Applies a message to state and returns any effects.
///
/// `gate` is consulted once per successful refresh scan and nowhere else.
pub fn update(
    mut state: AppState,
    msg: Msg,
    gate: &mut dyn FailureGate,
) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged { field, text } => {
            if reject_while_loading(&state, "input change") {
                return (state, Vec::new());
            }
            state.set_input(field, text);
            Vec::new()
        }
        Msg::Submitted(field) => {
            if reject_while_loading(&state, "submit") {
                return (state, Vec::new());
            }
            let content = state.take_input(field);
            match field {
                InputField::Single => vec![start_lookup(&mut state, content)],
                InputField::Bulk => vec![start_bulk(&mut state, content)],
            }
        }
        Msg::SubmitSingle(number) => {
            if reject_while_loading(&state, "lookup") {
                return (state, Vec::new());
            }
            vec![start_lookup(&mut state, number)]
        }
        Msg::SubmitBulk(raw) => {
            if reject_while_loading(&state, "bulk submission") {
                return (state, Vec::new());
            }
            vec![start_bulk(&mut state, raw)]
        }
        Msg::RefreshClicked => {
            if reject_while_loading(&state, "refresh") {
                return (state, Vec::new());
            }
            let request_id = state.begin(Operation::Refresh);
            status_debug!("refresh started as request {}", request_id);
            vec![Effect::RefreshScan { request_id }]
        }
        Msg::NoticeDismissed => {
            state.set_notice(None);
            Vec::new()
        }
        Msg::LookupCompleted { request_id, result } => {
            if accept_completion(&state, request_id, Operation::Lookup) {
                set_current_request(Some(request_id));
                match result {
                    Ok(record) => {
                        status_info!(
                            "lookup for {} returned '{}' ({})",
                            record.mobile_number,
                            record.message,
                            record.colour
                        );
                        state.finish(UiState::Idle);
                        state.set_notice(Some(LookupNotice::from_record(record)));
                    }
                    Err(failure) => fail(&mut state, &failure, false),
                }
                set_current_request(None);
            }
            Vec::new()
        }
        Msg::BulkCompleted { request_id, result } => {
            if accept_completion(&state, request_id, Operation::Bulk) {
                set_current_request(Some(request_id));
                match result {
                    Ok(ack) => {
                        status_info!("bulk submission acknowledged: {}", ack);
                        state.finish(UiState::Message(BULK_ACCEPTED.to_string()));
                        state.replace_results(ResultSet::empty());
                    }
                    Err(failure) => fail(&mut state, &failure, true),
                }
                set_current_request(None);
            }
            Vec::new()
        }
        Msg::ScanCompleted { request_id, result } => {
            if accept_completion(&state, request_id, Operation::Refresh) {
                set_current_request(Some(request_id));
                match result {
                    Ok(records) if gate.should_fail() => {
                        let failure = RequestFailure::new(
                            FailureCause::Simulated,
                            format!("discarded a valid scan of {} records", records.len()),
                        );
                        fail(&mut state, &failure, true);
                    }
                    Ok(records) => {
                        status_info!("refresh returned {} records", records.len());
                        state.finish(UiState::Idle);
                        state.replace_results(ResultSet::new(records));
                    }
                    Err(failure) => fail(&mut state, &failure, true),
                }
                set_current_request(None);
            }
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn start_lookup(state: &mut AppState, number: String) -> Effect {
    let request_id = state.begin(Operation::Lookup);
    status_debug!("lookup for '{}' started as request {}", number, request_id);
    Effect::LookupSingle { request_id, number }
}

fn start_bulk(state: &mut AppState, raw: String) -> Effect {
    let request_id = state.begin(Operation::Bulk);
    status_debug!(
        "bulk submission of {} bytes started as request {}",
        raw.len(),
        request_id
    );
    Effect::SubmitBulk { request_id, raw }
}

/// At most one request is in flight; new submissions are dropped until it resolves.
fn reject_while_loading(state: &AppState, action: &str) -> bool {
    match state.in_flight() {
        Some((request_id, operation)) => {
            status_warn!(
                "rejected {} while {} request {} is in flight",
                action,
                operation,
                request_id
            );
            true
        }
        None => false,
    }
}

fn accept_completion(state: &AppState, request_id: RequestId, operation: Operation) -> bool {
    match state.in_flight() {
        Some((in_flight, op)) if in_flight == request_id && op == operation => true,
        other => {
            status_warn!(
                "ignored stale {} completion for request {} (in flight: {:?})",
                operation,
                request_id,
                other
            );
            false
        }
    }
}

fn fail(state: &mut AppState, failure: &RequestFailure, clear_results: bool) {
    match failure.cause {
        FailureCause::Simulated => status_warn!("{}", failure),
        FailureCause::Auth | FailureCause::Network => status_error!("{}", failure),
    }
    state.finish(UiState::ErrorState(GENERIC_ERROR.to_string()));
    if clear_results {
        state.replace_results(ResultSet::empty());
    }
}
