use futures_util::StreamExt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use status_logging::status_debug;

use crate::config::{BULK_STATUS_PATH, SCAN_PATH, STATUS_PATH};
use crate::{
    AuthToken, BulkAck, ClientConfig, ClientError, NetworkError, NetworkErrorKind, StatusEntry,
};

/// Colour the backend sends when it has no opinion.
const DEFAULT_COLOUR: &str = "#FFFFFF";

/// The three backend operations. Each fetches a fresh token first.
#[async_trait::async_trait]
pub trait StatusClient: Send + Sync {
    async fn lookup_single(&self, number: &str) -> Result<StatusEntry, ClientError>;

    /// `raw` is forwarded untouched; the server splits it on commas.
    async fn submit_bulk(&self, raw: &str) -> Result<BulkAck, ClientError>;

    async fn refresh_scan(&self) -> Result<Vec<StatusEntry>, ClientError>;
}

#[derive(Serialize)]
struct LookupBody<'a> {
    mobile_number: &'a str,
}

#[derive(Serialize)]
struct BulkBody<'a> {
    numbers: &'a str,
}

/// Single lookup reply; some deployments only send `message`.
#[derive(Deserialize)]
struct LookupReply {
    mobile_number: Option<String>,
    message: String,
    colour: Option<String>,
}

#[derive(Clone)]
pub struct ReqwestStatusClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl ReqwestStatusClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let settings = config.settings();
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| NetworkError::new(NetworkErrorKind::Transport, err.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn token(&self) -> Result<AuthToken, ClientError> {
        Ok(self.config.token_provider().get_token().await?)
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, NetworkError> {
        self.config
            .endpoint(path)
            .map_err(|err| NetworkError::new(NetworkErrorKind::InvalidUrl, err.to_string()))
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Vec<u8>, ClientError> {
        let token = self.token().await?;
        let url = self.endpoint(path)?;
        let payload = encode(body)?;
        status_debug!("POST {} ({} bytes)", url, payload.len());

        let request = self
            .client
            .post(url)
            .header(AUTHORIZATION, token.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        Ok(self.send(request).await?)
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let token = self.token().await?;
        let url = self.endpoint(path)?;
        status_debug!("GET {}", url);

        let request = self.client.get(url).header(AUTHORIZATION, token.as_str());
        Ok(self.send(request).await?)
    }

    /// Sends the request and reads the body, enforcing the size cap.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, NetworkError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::new(
                NetworkErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.config.settings().max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk: bytes::Bytes = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl StatusClient for ReqwestStatusClient {
    async fn lookup_single(&self, number: &str) -> Result<StatusEntry, ClientError> {
        let body = self
            .post_json(STATUS_PATH, &LookupBody { mobile_number: number })
            .await?;
        let reply: LookupReply = decode(&body)?;
        let entry = StatusEntry {
            mobile_number: reply.mobile_number.unwrap_or_else(|| number.to_string()),
            message: reply.message,
            colour: reply.colour.unwrap_or_else(|| DEFAULT_COLOUR.to_string()),
        };
        status_debug!("lookup {} -> {}", entry.mobile_number, entry.message);
        Ok(entry)
    }

    async fn submit_bulk(&self, raw: &str) -> Result<BulkAck, ClientError> {
        let body = self
            .post_json(BULK_STATUS_PATH, &BulkBody { numbers: raw })
            .await?;
        let ack = BulkAck(opaque_ack(&body));
        status_debug!("bulk submission acknowledged: {}", ack);
        Ok(ack)
    }

    async fn refresh_scan(&self) -> Result<Vec<StatusEntry>, ClientError> {
        let body = self.get(SCAN_PATH).await?;
        let entries: Vec<StatusEntry> = decode(&body)?;
        status_debug!("scan returned {} entries", entries.len());
        Ok(entries)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Vec<u8>, NetworkError> {
    serde_json::to_vec(body)
        .map_err(|err| NetworkError::new(NetworkErrorKind::Encode, err.to_string()))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, NetworkError> {
    serde_json::from_slice(body)
        .map_err(|err| NetworkError::new(NetworkErrorKind::Decode, err.to_string()))
}

/// Acknowledgements are not interpreted: JSON passes through, anything else becomes a string.
fn opaque_ack(body: &[u8]) -> serde_json::Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(body).into_owned())
    })
}

fn too_large(max_bytes: u64, actual: u64) -> NetworkError {
    NetworkError::new(
        NetworkErrorKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> NetworkError {
    if err.is_timeout() {
        return NetworkError::new(NetworkErrorKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return NetworkError::new(NetworkErrorKind::Decode, err.to_string());
    }
    NetworkError::new(NetworkErrorKind::Transport, err.to_string())
}
