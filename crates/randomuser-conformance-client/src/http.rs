// crates/randomuser-conformance-client/src/http.rs
// ============================================================================
// Module: HTTP Transport
// Description: reqwest-backed transport for the API under test.
// Purpose: Issue bounded GET requests and record a request transcript.
// Dependencies: randomuser-conformance-core, reqwest, serde, tracing
// ============================================================================

//! ## Overview
//! [`HttpTransport`] joins relative paths onto a base URL, appends query
//! pairs in order, and reads the body up to a hard size limit. Every request
//! is appended to an in-memory transcript so runners can persist what was
//! sent and what came back. Failures are returned once; there is no retry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use randomuser_conformance_core::ApiResponse;
use randomuser_conformance_core::Transport;
use randomuser_conformance_core::TransportError;
use reqwest::Client;
use reqwest::Response;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://randomuser.me/api/";
/// Default response size limit in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = concat!("randomuser-conformance/", env!("CARGO_PKG_VERSION"));
/// Maximum redirects followed per request.
const MAX_REDIRECTS: usize = 5;
/// Tracing target for request events.
const LOG_TARGET: &str = "randomuser_conformance::http";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for [`HttpTransport`].
///
/// # Invariants
/// - `base_url` is `http` or `https` and its path ends with `/`.
/// - `max_response_bytes` is a hard upper bound on response bodies.
/// - `timeout = None` keeps the client library default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// Base URL that request paths are joined onto.
    pub base_url: Url,
    /// Optional whole-request timeout.
    pub timeout: Option<Duration>,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
}

impl HttpTransportConfig {
    /// Builds a configuration for `base_url` with default limits.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] when the URL does not parse or
    /// is not `http`/`https`.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        })
    }
}

/// Parses a base URL and ensures its path ends with `/`.
///
/// # Errors
///
/// Returns [`TransportError::InvalidUrl`] for unparseable or non-HTTP URLs.
pub fn normalize_base_url(raw: &str) -> Result<Url, TransportError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|err| TransportError::InvalidUrl(format!("{raw}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidUrl(format!("{raw}: scheme must be http or https")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One request/response exchange recorded by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Monotonic request sequence number, starting at 1.
    pub sequence: u64,
    /// Relative path requested.
    pub path: String,
    /// Query pairs in send order.
    pub query: Vec<(String, String)>,
    /// HTTP status when a response arrived.
    pub status: Option<u16>,
    /// Body size in bytes when a response arrived.
    pub bytes: Option<usize>,
    /// Transport error message when no response arrived.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// reqwest-backed [`Transport`].
///
/// # Invariants
/// - Requests are never retried.
/// - Transcript sequence numbers are unique per transport instance.
pub struct HttpTransport {
    /// Transport configuration.
    config: HttpTransportConfig,
    /// Shared HTTP client.
    client: Client,
    /// Recorded exchanges.
    transcript: Mutex<Vec<TranscriptEntry>>,
    /// Last issued sequence number.
    sequence: AtomicU64,
}

impl HttpTransport {
    /// Creates a transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] when the HTTP client cannot be built.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(Policy::limited(MAX_REDIRECTS));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::Request(format!("http client build failed: {err}")))?;
        Ok(Self {
            config,
            client,
            transcript: Mutex::new(Vec::new()),
            sequence: AtomicU64::new(0),
        })
    }

    /// Returns the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Returns a snapshot of the recorded exchanges in sequence order.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        let mut entries = self.transcript.lock().unwrap_or_else(PoisonError::into_inner).clone();
        entries.sort_by_key(|entry| entry.sequence);
        entries
    }

    /// Builds the absolute URL for `path` with `query` appended in order.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] when `path` cannot be joined.
    pub fn request_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, TransportError> {
        let mut url = self
            .config
            .base_url
            .join(path)
            .map_err(|err| TransportError::InvalidUrl(format!("{path}: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Sends the request and snapshots the response.
    async fn send(&self, url: Url) -> Result<ApiResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let body = read_body_limited(response, self.config.max_response_bytes).await?;
        Ok(ApiResponse::from_bytes(status, content_type.as_deref(), body))
    }

    /// Appends a transcript entry.
    fn record(&self, entry: TranscriptEntry) {
        self.transcript.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<ApiResponse, TransportError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let result = match self.request_url(path, query) {
            Ok(url) => {
                tracing::debug!(target: LOG_TARGET, sequence, %url, "sending request");
                self.send(url).await
            }
            Err(err) => Err(err),
        };
        match &result {
            Ok(response) => tracing::debug!(
                target: LOG_TARGET,
                sequence,
                status = response.status,
                bytes = response.body.len(),
                "received response"
            ),
            Err(err) => tracing::warn!(target: LOG_TARGET, sequence, error = %err, "request failed"),
        }
        self.record(TranscriptEntry {
            sequence,
            path: path.to_string(),
            query: query.to_vec(),
            status: result.as_ref().ok().map(|response| response.status),
            bytes: result.as_ref().ok().map(|response| response.body.len()),
            error: result.as_ref().err().map(ToString::to_string),
        });
        result
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body while enforcing a maximum size.
async fn read_body_limited(
    mut response: Response,
    max_bytes: usize,
) -> Result<Vec<u8>, TransportError> {
    if let Some(declared) = response.content_length()
        && declared > max_bytes as u64
    {
        return Err(TransportError::Body(format!(
            "declared length {declared} exceeds limit of {max_bytes} bytes"
        )));
    }
    let mut body = Vec::new();
    while let Some(chunk) =
        response.chunk().await.map_err(|err| TransportError::Body(err.to_string()))?
    {
        if body.len() + chunk.len() > max_bytes {
            return Err(TransportError::Body(format!(
                "response exceeds limit of {max_bytes} bytes"
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
