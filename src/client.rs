//! Main find-best-keyword API client.
//!
//! `KeywordClient` is the entry point: it wires the HTTP layer to the
//! polling loop and exposes the four public operations (start, fetch, poll,
//! run).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::errors::{KeywordError, KeywordResult};
use crate::http::HttpClient;
use crate::job::JobSnapshot;
use crate::polling::{self, NoopObserver, PollConfig, PollObserver};
use crate::transport::JobTransport;

/// Endpoint for job creation; per-job paths append the job id.
pub const FIND_BEST_KEYWORD_ENDPOINT: &str = "/v1/find-best-keyword";

fn job_path(job_id: &str) -> String {
    format!("{FIND_BEST_KEYWORD_ENDPOINT}/{job_id}")
}

/// Wire envelope for `POST /v1/find-best-keyword`.
#[derive(Debug, Deserialize)]
struct StartEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(rename = "jobId", default)]
    job_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Wire envelope for `GET /v1/find-best-keyword/{jobId}`.
#[derive(Debug, Deserialize)]
struct SnapshotEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<JobSnapshot>,
    #[serde(default)]
    error: Option<String>,
}

/// Find-best-keyword API client.
///
/// Immutable after construction; a single instance may serve any number of
/// concurrent polls of independent jobs.
///
/// # Example
///
/// ```ignore
/// let client = KeywordClient::new(None)?;
/// let keyword = client.run("best keyword for rust http clients").await?;
/// ```
pub struct KeywordClient {
    http: HttpClient,
    base_url: String,
    poll_defaults: PollConfig,
}

impl KeywordClient {
    /// Create a client, optionally overriding the base URL.
    pub fn new(base_url: Option<&str>) -> KeywordResult<Self> {
        let mut config = ClientConfig::default();
        if let Some(url) = base_url {
            config.base_url = url.to_string();
        }
        Self::from_config(config)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(base_url: Option<&str>, timeout_secs: u64) -> KeywordResult<Self> {
        let mut config = ClientConfig::default();
        if let Some(url) = base_url {
            config.base_url = url.to_string();
        }
        config.request_timeout_secs = timeout_secs;
        Self::from_config(config)
    }

    /// Create a client from environment-backed defaults.
    ///
    /// Reads the base URL from `KEYWORD_BACKEND_URL` when set.
    pub fn from_env() -> KeywordResult<Self> {
        Self::from_config(ClientConfig::default())
    }

    /// Create a client from an explicit configuration.
    pub fn from_config(config: ClientConfig) -> KeywordResult<Self> {
        let http = HttpClient::new(&config.base_url, config.request_timeout_secs)?;
        Ok(Self {
            http,
            base_url: config.base_url,
            poll_defaults: config.poll,
        })
    }

    /// Get the base URL for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a prompt and return the created job's id.
    ///
    /// The prompt is not validated locally; an absent or empty prompt is the
    /// service's concern and comes back as an [`KeywordError::InvalidStart`].
    pub async fn start_job(&self, prompt: &str) -> KeywordResult<String> {
        let body = json!({ "prompt": prompt });
        let envelope: StartEnvelope = self
            .http
            .post_json(FIND_BEST_KEYWORD_ENDPOINT, &body)
            .await?;

        if !envelope.success {
            return Err(KeywordError::invalid_start(envelope.error));
        }
        let job_id = envelope
            .job_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| KeywordError::invalid_start(None))?;

        debug!(%job_id, "job created");
        Ok(job_id)
    }

    /// Fetch the current snapshot of a job.
    pub async fn get_job(&self, job_id: &str) -> KeywordResult<JobSnapshot> {
        let envelope: SnapshotEnvelope = match self.http.get(&job_path(job_id)).await {
            Ok(envelope) => envelope,
            Err(err) if err.status() == Some(404) => return Err(KeywordError::NotFound),
            Err(err) => return Err(err.into()),
        };

        if !envelope.success {
            return Err(KeywordError::RequestFailed(envelope.error.unwrap_or_else(
                || "Unknown error occurred while retrieving the job.".to_string(),
            )));
        }
        envelope
            .data
            .ok_or_else(|| KeywordError::Protocol("job payload missing data".to_string()))
    }

    /// Poll a job with the client's default interval and timeout.
    pub async fn poll_job(&self, job_id: &str) -> KeywordResult<String> {
        self.poll_job_with(job_id, &self.poll_defaults, &NoopObserver)
            .await
    }

    /// Poll a job with an explicit config and observer.
    pub async fn poll_job_with(
        &self,
        job_id: &str,
        config: &PollConfig,
        observer: &dyn PollObserver,
    ) -> KeywordResult<String> {
        polling::poll_job(self, job_id, config, observer).await
    }

    /// Start a job for the prompt and poll it to completion.
    pub async fn run(&self, prompt: &str) -> KeywordResult<String> {
        self.run_with(prompt, &self.poll_defaults, &NoopObserver)
            .await
    }

    /// Start a job and poll it with an explicit config and observer.
    pub async fn run_with(
        &self,
        prompt: &str,
        config: &PollConfig,
        observer: &dyn PollObserver,
    ) -> KeywordResult<String> {
        let job_id = KeywordClient::start_job(self, prompt).await?;
        info!(%job_id, "job started, polling");
        self.poll_job_with(&job_id, config, observer).await
    }
}

#[async_trait]
impl JobTransport for KeywordClient {
    async fn start_job(&self, prompt: &str) -> Result<String, KeywordError> {
        KeywordClient::start_job(self, prompt).await
    }

    async fn fetch_job(&self, job_id: &str) -> Result<JobSnapshot, KeywordError> {
        self.get_job(job_id).await
    }
}

impl std::fmt::Debug for KeywordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> KeywordClient {
        KeywordClient::new(Some(&server.base_url())).unwrap()
    }

    #[test]
    fn test_job_path() {
        assert_eq!(job_path("abc"), "/v1/find-best-keyword/abc");
    }

    #[tokio::test]
    async fn test_start_job_created() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/find-best-keyword")
                .json_body(serde_json::json!({"prompt": "rust http clients"}));
            then.status(201)
                .json_body(serde_json::json!({"success": true, "jobId": "job-123"}));
        });

        let client = client_for(&server);
        let job_id = client.start_job("rust http clients").await.unwrap();

        assert_eq!(job_id, "job-123");
        mock.assert();
    }

    #[tokio::test]
    async fn test_start_job_accepted_202() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/v1/find-best-keyword");
            then.status(202)
                .json_body(serde_json::json!({"success": true, "jobId": "job-202"}));
        });

        let client = client_for(&server);
        assert_eq!(client.start_job("p").await.unwrap(), "job-202");
    }

    #[tokio::test]
    async fn test_start_job_non_2xx_is_request_failed() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/v1/find-best-keyword");
            then.status(500).body("internal error");
        });

        let client = client_for(&server);
        let err = client.start_job("p").await.unwrap_err();
        match err {
            KeywordError::RequestFailed(msg) => {
                assert!(msg.contains("500"));
                assert!(!msg.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_start_job_rejected_by_service() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/v1/find-best-keyword");
            then.status(200)
                .json_body(serde_json::json!({"success": false, "error": "Prompt is required."}));
        });

        let client = client_for(&server);
        let err = client.start_job("").await.unwrap_err();
        assert!(matches!(err, KeywordError::InvalidStart(_)));
        assert_eq!(err.to_string(), "Prompt is required.");
    }

    #[tokio::test]
    async fn test_start_job_missing_job_id() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/v1/find-best-keyword");
            then.status(201).json_body(serde_json::json!({"success": true}));
        });

        let client = client_for(&server);
        let err = client.start_job("p").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to start the job.");
    }

    #[tokio::test]
    async fn test_get_job_snapshot() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/v1/find-best-keyword/job-123");
            then.status(200).json_body(serde_json::json!({
                "success": true,
                "data": {"status": "processing", "result": null}
            }));
        });

        let client = client_for(&server);
        let snapshot = client.get_job("job-123").await.unwrap();
        assert_eq!(snapshot.status, JobStatus::Processing);
        assert!(snapshot.result.is_none());
    }

    #[tokio::test]
    async fn test_get_job_404_is_not_found() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/v1/find-best-keyword/missing");
            then.status(404);
        });

        let client = client_for(&server);
        let err = client.get_job("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Job ID not found.");
    }

    #[tokio::test]
    async fn test_get_job_error_envelope() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/v1/find-best-keyword/job-123");
            then.status(200)
                .json_body(serde_json::json!({"success": false, "error": "storage offline"}));
        });

        let client = client_for(&server);
        let err = client.get_job("job-123").await.unwrap_err();
        assert_eq!(err.to_string(), "storage offline");
    }

    #[tokio::test]
    async fn test_run_end_to_end() {
        let server = MockServer::start();
        let _start = server.mock(|when, then| {
            when.method(POST).path("/v1/find-best-keyword");
            then.status(201)
                .json_body(serde_json::json!({"success": true, "jobId": "abc"}));
        });
        let _status = server.mock(|when, then| {
            when.method(GET).path("/v1/find-best-keyword/abc");
            then.status(200).json_body(serde_json::json!({
                "success": true,
                "data": {"status": "completed", "result": "keyword42"}
            }));
        });

        let client = client_for(&server);
        let result = client.run("best keyword please").await.unwrap();
        assert_eq!(result, "keyword42");
    }

    #[tokio::test]
    async fn test_run_propagates_start_failure() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/v1/find-best-keyword");
            then.status(200)
                .json_body(serde_json::json!({"success": false, "error": "Prompt is required."}));
        });

        let client = client_for(&server);
        let err = client.run("").await.unwrap_err();
        assert_eq!(err.to_string(), "Prompt is required.");
    }

    #[tokio::test]
    async fn test_run_surfaces_job_failure() {
        let server = MockServer::start();
        let _start = server.mock(|when, then| {
            when.method(POST).path("/v1/find-best-keyword");
            then.status(201)
                .json_body(serde_json::json!({"success": true, "jobId": "abc"}));
        });
        let _status = server.mock(|when, then| {
            when.method(GET).path("/v1/find-best-keyword/abc");
            then.status(200).json_body(serde_json::json!({
                "success": true,
                "data": {"status": "failed", "result": null, "error": "bad input"}
            }));
        });

        let client = client_for(&server);
        let err = client.run("p").await.unwrap_err();
        assert!(matches!(err, KeywordError::JobFailed(_)));
        assert_eq!(err.to_string(), "bad input");
    }

    #[tokio::test]
    async fn test_network_fault_is_request_failed() {
        // Nothing listens on this port; reqwest fails at connect.
        let client = KeywordClient::with_timeout(Some("http://127.0.0.1:1"), 1).unwrap();
        let err = client.start_job("p").await.unwrap_err();
        assert!(matches!(err, KeywordError::RequestFailed(_)));
        assert!(!err.to_string().is_empty());
    }
}
