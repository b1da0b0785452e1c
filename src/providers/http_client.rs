//! HTTP Transport for Courier Provider APIs
//!
//! Courier operations talk to the provider through the `Transport` trait so
//! they never depend on a concrete HTTP stack. `InpostHttpClient` is the
//! reqwest-backed implementation used in production.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ApiSettings;

// ============================================================================
// Request / Response Types
// ============================================================================

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a value so it stays one path segment after `Url::join`
pub fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// HTTP method used by courier operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Provider request described as plain data
///
/// `path` is relative to the API host. Query pairs are sent in order and may
/// repeat a key (e.g. `shipment_ids[]`).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub json: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        ApiRequest {
            method: HttpMethod::Get,
            path: path.into(),
            query: Vec::new(),
            json: None,
        }
    }

    pub fn post_json(path: impl Into<String>, body: serde_json::Value) -> Self {
        ApiRequest {
            method: HttpMethod::Post,
            path: path.into(),
            query: Vec::new(),
            json: Some(body),
        }
    }

    /// Append a query pair
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Values of every query pair with the given key, in order
    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Successful (2xx) provider response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Streamed response body
pub type BodyStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Transport failures
#[derive(Debug, Error)]
pub enum TransportError {
    /// The provider answered with a non-2xx status
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("{message}")]
    Network { message: String, code: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network {
            code: err.status().map(|s| i32::from(s.as_u16())).unwrap_or(0),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Executes provider requests
///
/// Implementations must be safe to share between concurrent operations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and buffer the whole body
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;

    /// Execute a request and hand the body back as a byte stream
    async fn stream(&self, request: ApiRequest) -> Result<BodyStream, TransportError>;
}

// ============================================================================
// Reqwest Implementation
// ============================================================================

/// ShipX HTTP client with bearer authentication
#[derive(Clone)]
pub struct InpostHttpClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl InpostHttpClient {
    /// Create a client for the given host and API token
    pub fn new(base_url: Url, token: impl Into<String>, timeout: Duration, connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(10)
            .user_agent(concat!("inpost-courier/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(InpostHttpClient {
            client,
            base_url,
            token: token.into(),
        })
    }

    /// Create a client from API settings
    pub fn from_settings(settings: &ApiSettings, base_url: Url) -> Result<Self, TransportError> {
        Self::new(
            base_url,
            settings.token.clone(),
            Duration::from_secs(settings.timeout_secs),
            Duration::from_secs(settings.connect_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url.join(path).map_err(|e| TransportError::Network {
            message: format!("invalid request path '{}': {}", path, e),
            code: 0,
        })
    }

    async fn execute(&self, request: ApiRequest) -> Result<reqwest::Response, TransportError> {
        let url = self.url_for(&request.path)?;
        debug!(method = ?request.method, url = %url, "ShipX API request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        builder = builder.bearer_auth(&self.token).query(&request.query);
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl std::fmt::Debug for InpostHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InpostHttpClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for InpostHttpClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let response = self.execute(request).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(ApiResponse { status, body })
    }

    async fn stream(&self, request: ApiRequest) -> Result<BodyStream, TransportError> {
        let response = self.execute(request).await?;
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::from))
            .boxed())
    }
}
