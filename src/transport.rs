//! Transport seam between the poller and the HTTP layer.
//!
//! The poll loop only needs the two primitive operations below, so it is
//! written against this trait and exercised in tests with scripted fakes.

use async_trait::async_trait;

use crate::errors::KeywordError;
use crate::job::JobSnapshot;

/// The two remote primitives the polling loop is built on.
///
/// Implementors encapsulate request construction, serialization, and status
/// code mapping; all failure modes come back as [`KeywordError`] values.
#[async_trait]
pub trait JobTransport: Send + Sync {
    /// Submit a prompt and return the id of the created job.
    async fn start_job(&self, prompt: &str) -> Result<String, KeywordError>;

    /// Fetch a fresh snapshot of the job with the given id.
    async fn fetch_job(&self, job_id: &str) -> Result<JobSnapshot, KeywordError>;
}
