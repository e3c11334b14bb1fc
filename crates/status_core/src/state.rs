use std::fmt;

use crate::view_model::{AppViewModel, ResultRowView, RowShade};
use crate::{tint_for, LookupNotice, ResultSet};

pub type RequestId = u64;

/// The only text the user ever sees for a failed action.
pub const GENERIC_ERROR: &str = "An error occurred";

/// Shown after the backend accepted a bulk submission.
pub const BULK_ACCEPTED: &str = "Numbers sent to server. Press refresh to view statuses.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Lookup,
    Bulk,
    Refresh,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Lookup => write!(f, "lookup"),
            Operation::Bulk => write!(f, "bulk submission"),
            Operation::Refresh => write!(f, "refresh"),
        }
    }
}

/// Mutually exclusive UI state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading {
        request_id: RequestId,
        operation: Operation,
    },
    Message(String),
    ErrorState(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Single,
    Bulk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// No authenticated session, or the token could not be obtained.
    Auth,
    /// Transport failure, non-success status or malformed body.
    Network,
    /// The refresh failure gate discarded a valid response.
    Simulated,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Auth => write!(f, "auth"),
            FailureCause::Network => write!(f, "network"),
            FailureCause::Simulated => write!(f, "simulated"),
        }
    }
}

/// Why a request failed. Only ever logged; the user sees [`GENERIC_ERROR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub cause: FailureCause,
    pub detail: String,
}

impl RequestFailure {
    pub fn new(cause: FailureCause, detail: impl Into<String>) -> Self {
        Self {
            cause,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failure: {}", self.cause, self.detail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    ui: UiState,
    results: ResultSet,
    notice: Option<LookupNotice>,
    single_input: String,
    bulk_input: String,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn notice(&self) -> Option<&LookupNotice> {
        self.notice.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.ui.is_loading()
    }

    /// The in-flight request, if any.
    pub fn in_flight(&self) -> Option<(RequestId, Operation)> {
        match self.ui {
            UiState::Loading {
                request_id,
                operation,
            } => Some((request_id, operation)),
            _ => None,
        }
    }

    /// Id of the most recently started request, if any.
    pub fn last_request_id(&self) -> Option<RequestId> {
        (self.next_request_id > 0).then_some(self.next_request_id)
    }

    pub fn input(&self, field: InputField) -> &str {
        match field {
            InputField::Single => &self.single_input,
            InputField::Bulk => &self.bulk_input,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .results
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| ResultRowView {
                index,
                mobile_number: record.mobile_number.clone(),
                message: record.message.clone(),
                colour: record.colour.clone(),
                tint: tint_for(&record.colour),
                shade: RowShade::for_index(index),
            })
            .collect();

        let (message, error) = match &self.ui {
            UiState::Message(text) => (Some(text.clone()), None),
            UiState::ErrorState(text) => (None, Some(text.clone())),
            UiState::Idle | UiState::Loading { .. } => (None, None),
        };

        AppViewModel {
            ui_state: self.ui.clone(),
            loading: self.is_loading(),
            inputs_enabled: !self.is_loading(),
            single_input: self.single_input.clone(),
            bulk_input: self.bulk_input.clone(),
            message,
            error,
            notice: self.notice.clone(),
            rows,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, field: InputField, text: String) {
        let slot = match field {
            InputField::Single => &mut self.single_input,
            InputField::Bulk => &mut self.bulk_input,
        };
        if *slot != text {
            *slot = text;
            self.mark_dirty();
        }
    }

    /// Takes the field content and resets it to empty.
    pub(crate) fn take_input(&mut self, field: InputField) -> String {
        let slot = match field {
            InputField::Single => &mut self.single_input,
            InputField::Bulk => &mut self.bulk_input,
        };
        let taken = std::mem::take(slot);
        if !taken.is_empty() {
            self.mark_dirty();
        }
        taken
    }

    /// Enters `Loading` for a new request and clears any message, error or notice.
    pub(crate) fn begin(&mut self, operation: Operation) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.ui = UiState::Loading {
            request_id,
            operation,
        };
        self.notice = None;
        self.mark_dirty();
        request_id
    }

    pub(crate) fn finish(&mut self, ui: UiState) {
        debug_assert!(!ui.is_loading());
        self.ui = ui;
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: Option<LookupNotice>) {
        if self.notice != notice {
            self.notice = notice;
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_results(&mut self, results: ResultSet) {
        self.results = results;
        self.mark_dirty();
    }
}
