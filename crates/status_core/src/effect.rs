use crate::RequestId;

/// Network work requested by the state machine; executed by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LookupSingle { request_id: RequestId, number: String },
    SubmitBulk { request_id: RequestId, raw: String },
    RefreshScan { request_id: RequestId },
}

impl Effect {
    pub fn request_id(&self) -> RequestId {
        match self {
            Effect::LookupSingle { request_id, .. }
            | Effect::SubmitBulk { request_id, .. }
            | Effect::RefreshScan { request_id } => *request_id,
        }
    }
}
