use std::fmt;

use crate::AuthError;

/// Opaque bearer credential. Never cached across calls.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(<{} bytes redacted>)", self.0.len())
    }
}

/// Supplies a fresh token for the current authenticated session.
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self) -> Result<AuthToken, AuthError>;
}

/// Fixed token; `None` models a signed-out session.
#[derive(Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<AuthToken>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(AuthToken::new(token)),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<AuthToken, AuthError> {
        self.token.clone().ok_or(AuthError::NoSession)
    }
}

/// Reads the token from an environment variable on every call, so a token
/// refreshed by an external sign-in helper is picked up without restarting.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

#[async_trait::async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn get_token(&self) -> Result<AuthToken, AuthError> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(AuthToken::new(value.trim())),
            Ok(_) | Err(std::env::VarError::NotPresent) => Err(AuthError::NoSession),
            Err(err) => Err(AuthError::Provider(format!("{}: {err}", self.var))),
        }
    }
}
