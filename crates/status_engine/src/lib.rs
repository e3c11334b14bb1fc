//! Status engine: authenticated HTTP calls and their background execution.
mod auth;
mod client;
mod config;
mod engine;
mod types;

pub use auth::{AuthToken, EnvTokenProvider, StaticTokenProvider, TokenProvider};
pub use client::{ReqwestStatusClient, StatusClient};
pub use config::{ClientConfig, ClientSettings, ConfigError};
pub use engine::{execute, EngineHandle};
pub use types::{
    AuthError, BulkAck, ClientError, EngineEvent, NetworkError, NetworkErrorKind, Request,
    RequestId, StatusEntry,
};
