use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::TokenProvider;

pub(crate) const STATUS_PATH: &str = "status";
pub(crate) const BULK_STATUS_PATH: &str = "bulk_status";
pub(crate) const SCAN_PATH: &str = "scan";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// `None` waits for the transport indefinitely.
    pub connect_timeout: Option<Duration>,
    /// `None` lets every call run to completion.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Constructed once per session and immutable afterwards.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    token_provider: Arc<dyn TokenProvider>,
    settings: ClientSettings,
}

impl ClientConfig {
    pub fn new(
        base_url: &str,
        token_provider: Arc<dyn TokenProvider>,
        settings: ClientSettings,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            token_provider,
            settings,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token_provider(&self) -> &Arc<dyn TokenProvider> {
        &self.token_provider
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

/// Parses `raw` and makes sure the path ends in `/` so endpoints join beneath it.
fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be a base".into()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
