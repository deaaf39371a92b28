//! HTTP client for the find-best-keyword API.
//!
//! Thin async wrapper over `reqwest` with pooled connections, a fixed
//! per-request timeout, and JSON helpers. All failures come back as
//! [`HttpError`] values.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default pool size for idle connections per host.
const DEFAULT_POOL_SIZE: usize = 32;

/// Default connection timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP error details.
#[derive(Debug, Clone)]
pub struct HttpErrorDetail {
    pub status: u16,
    pub url: String,
    pub message: String,
    pub body_snippet: Option<String>,
}

impl std::fmt::Display for HttpErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} for {}: {}", self.status, self.url, self.message)?;
        if let Some(ref snippet) = self.body_snippet {
            let truncated: String = snippet.chars().take(200).collect();
            write!(f, " | body[0:200]={}", truncated)?;
        }
        Ok(())
    }
}

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request failed: {0} (is_connect={}, is_timeout={})", .0.is_connect(), .0.is_timeout())]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Response(HttpErrorDetail),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("json parse error: {0}")]
    JsonParse(String),
}

impl HttpError {
    /// Create an HTTP error from a non-2xx response.
    pub fn from_response(status: u16, url: &str, body: Option<&str>) -> Self {
        // Keep enough body to preserve structured JSON error payloads even
        // though Display truncates to 200 chars.
        let body_snippet = body.map(|s| s.chars().take(4096).collect());
        HttpError::Response(HttpErrorDetail {
            status,
            url: url.to_string(),
            message: "request_failed".to_string(),
            body_snippet,
        })
    }

    /// Get the HTTP status code, if available.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Response(detail) => Some(detail.status),
            HttpError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Async HTTP client for the find-best-keyword API.
///
/// Configuration-only after construction (base URL, headers, timeout), so a
/// single instance is safe to reuse across concurrent polls.
///
/// # Example
///
/// ```ignore
/// let client = HttpClient::new("https://api.example.com", 10)?;
/// let snapshot: Value = client.get("/v1/find-best-keyword/abc").await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the API (without trailing slash)
    /// * `timeout_secs` - Per-request timeout in seconds
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, HttpError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(HttpError::InvalidUrl(format!("unsupported scheme: {other}")));
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(DEFAULT_POOL_SIZE)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .build()
            .map_err(HttpError::Request)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client was constructed with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Convert a relative path to an absolute URL.
    fn abs_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request and decode a JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let url = self.abs_url(path);
        let request = self.client.get(&url).build().map_err(HttpError::Request)?;
        let (status, body) = self.send(request).await?;
        parse_json(status, &url, &body)
    }

    /// Make a POST request with a JSON body and decode a JSON response.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, HttpError> {
        let url = self.abs_url(path);
        let request = self
            .client
            .post(&url)
            .json(body)
            .build()
            .map_err(HttpError::Request)?;
        let (status, body_bytes) = self.send(request).await?;
        parse_json(status, &url, &body_bytes)
    }

    async fn send(&self, request: reqwest::Request) -> Result<(u16, Vec<u8>), HttpError> {
        let resp = self.client.execute(request).await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        Ok((status, body.to_vec()))
    }
}

fn parse_json<T: DeserializeOwned>(status: u16, url: &str, body: &[u8]) -> Result<T, HttpError> {
    if !(200..300).contains(&status) {
        let text = String::from_utf8_lossy(body);
        return Err(HttpError::from_response(
            status,
            url,
            if text.trim().is_empty() { None } else { Some(&text) },
        ));
    }

    serde_json::from_slice(body).map_err(|e| {
        let text = String::from_utf8_lossy(body);
        // Char-aware truncation; a byte slice could split a multibyte char.
        let snippet: String = text.chars().take(100).collect();
        HttpError::JsonParse(format!("{}: {}", e, snippet))
    })
}
