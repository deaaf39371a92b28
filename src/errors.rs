//! Error types for the keyword-jobs client.
//!
//! Every failure mode of the public operations maps to exactly one variant
//! here; the transport layer never lets a raw fault escape past it.

use crate::http::HttpError;
use thiserror::Error;

/// Unified error enum for all client operations.
///
/// Callers are expected to treat any error as terminal for the operation
/// that produced it; the `Display` impl yields the flat message string.
#[derive(Debug, Error)]
pub enum KeywordError {
    /// A single HTTP call failed: non-2xx response or network fault.
    #[error("{0}")]
    RequestFailed(String),

    /// The service does not know the requested job id.
    #[error("Job ID not found.")]
    NotFound,

    /// The remote job reached the `failed` status.
    #[error("{0}")]
    JobFailed(String),

    /// The polling deadline elapsed before the job reached a terminal status.
    #[error("Polling timed out after {timeout_ms}ms")]
    PollTimeout { timeout_ms: u64 },

    /// The start call did not yield a usable job id.
    #[error("{0}")]
    InvalidStart(String),

    /// The service answered with a payload the client cannot interpret.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Client-side configuration problem (bad base URL, etc).
    #[error("config error: {0}")]
    Config(String),
}

impl KeywordError {
    /// Create an invalid-start error, falling back to the generic message.
    pub fn invalid_start(message: Option<String>) -> Self {
        KeywordError::InvalidStart(
            message.unwrap_or_else(|| "Failed to start the job.".to_string()),
        )
    }

    /// Create a job-failed error, falling back to the generic message.
    pub fn job_failed(message: Option<String>) -> Self {
        KeywordError::JobFailed(message.unwrap_or_else(|| "Job failed.".to_string()))
    }

    /// Check if this is a polling timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, KeywordError::PollTimeout { .. })
    }

    /// Check if this is an unknown-job-id error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KeywordError::NotFound)
    }
}

impl From<HttpError> for KeywordError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Response(detail) => KeywordError::RequestFailed(detail.to_string()),
            HttpError::Request(e) => KeywordError::RequestFailed(format!("request failed: {e}")),
            HttpError::InvalidUrl(msg) => KeywordError::Config(msg),
            HttpError::JsonParse(msg) => KeywordError::Protocol(msg),
        }
    }
}

/// Result type alias using KeywordError.
pub type KeywordResult<T> = Result<T, KeywordError>;
