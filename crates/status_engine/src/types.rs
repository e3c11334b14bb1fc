use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

/// One phone number's status as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub mobile_number: String,
    pub message: String,
    pub colour: String,
}

/// Opaque acknowledgement of a bulk submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkAck(pub serde_json::Value);

impl fmt::Display for BulkAck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Lookup { number: String },
    Bulk { raw: String },
    Scan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    LookupDone {
        request_id: RequestId,
        result: Result<StatusEntry, ClientError>,
    },
    BulkDone {
        request_id: RequestId,
        result: Result<BulkAck, ClientError>,
    },
    ScanDone {
        request_id: RequestId,
        result: Result<Vec<StatusEntry>, ClientError>,
    },
}

impl EngineEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            EngineEvent::LookupDone { request_id, .. }
            | EngineEvent::BulkDone { request_id, .. }
            | EngineEvent::ScanDone { request_id, .. } => *request_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no authenticated session")]
    NoSession,
    #[error("token retrieval failed: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct NetworkError {
    pub kind: NetworkErrorKind,
    pub message: String,
}

impl NetworkError {
    pub(crate) fn new(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkErrorKind {
    InvalidUrl,
    Transport,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Encode,
    Decode,
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkErrorKind::InvalidUrl => write!(f, "invalid url"),
            NetworkErrorKind::Transport => write!(f, "transport error"),
            NetworkErrorKind::Timeout => write!(f, "timeout"),
            NetworkErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            NetworkErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            NetworkErrorKind::Encode => write!(f, "request body could not be encoded"),
            NetworkErrorKind::Decode => write!(f, "malformed response body"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

impl ClientError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }
}
