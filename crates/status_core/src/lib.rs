//! Status core: pure request state machine and view-model helpers.
mod effect;
mod gate;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use gate::{FailureGate, FixedFailureGate, RandomFailureGate, DEFAULT_FAILURE_PROBABILITY};
pub use msg::Msg;
pub use record::{display_colour, tint_for, LookupNotice, ResultSet, StatusRecord, TINT_ALPHA};
pub use state::{
    AppState, FailureCause, InputField, Operation, RequestFailure, RequestId, UiState,
    BULK_ACCEPTED, GENERIC_ERROR,
};
pub use update::update;
pub use view_model::{AppViewModel, ResultRowView, RowShade};
