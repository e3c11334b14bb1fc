use crate::{LookupNotice, UiState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub ui_state: UiState,
    pub loading: bool,
    pub inputs_enabled: bool,
    pub single_input: String,
    pub bulk_input: String,
    pub message: Option<String>,
    pub error: Option<String>,
    pub notice: Option<LookupNotice>,
    pub rows: Vec<ResultRowView>,
    pub dirty: bool,
}

/// Alternating row treatment, keyed by row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShade {
    Even,
    Odd,
}

impl RowShade {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            RowShade::Even
        } else {
            RowShade::Odd
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub index: usize,
    pub mobile_number: String,
    pub message: String,
    pub colour: String,
    /// Background tint for the message cell (`colour` with a low alpha suffix).
    pub tint: String,
    pub shade: RowShade,
}
