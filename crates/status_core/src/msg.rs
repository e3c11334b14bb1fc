use crate::{InputField, RequestFailure, RequestId, StatusRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited one of the input boxes.
    InputChanged { field: InputField, text: String },
    /// User submitted the current content of an input box.
    Submitted(InputField),
    /// Single lookup for an explicit number, bypassing the input box.
    SubmitSingle(String),
    /// Bulk submission of a raw comma-separated string, bypassing the input box.
    SubmitBulk(String),
    /// User pressed Refresh on the result view.
    RefreshClicked,
    /// User closed the lookup notice.
    NoticeDismissed,
    /// Network completion for a single lookup.
    LookupCompleted {
        request_id: RequestId,
        result: Result<StatusRecord, RequestFailure>,
    },
    /// Network completion for a bulk submission. The acknowledgement is opaque.
    BulkCompleted {
        request_id: RequestId,
        result: Result<String, RequestFailure>,
    },
    /// Network completion for a refresh scan.
    ScanCompleted {
        request_id: RequestId,
        result: Result<Vec<StatusRecord>, RequestFailure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
}
