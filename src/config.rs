//! Client configuration.

use crate::polling::PollConfig;

/// Default base URL of the find-best-keyword service.
pub const DEFAULT_BASE_URL: &str = "https://http-erabu-eidos-production-80.schnworks.com";

/// Default per-request timeout in seconds, independent of the poll deadline.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for a [`crate::KeywordClient`].
///
/// `Default` reads the base URL from `KEYWORD_BACKEND_URL` when set and
/// otherwise falls back to the production service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Defaults used by `poll_job`/`run` when the caller does not override.
    pub poll: PollConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let base_url = std::env::var("KEYWORD_BACKEND_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        ClientConfig {
            base_url,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            poll: PollConfig::default(),
        }
    }
}
