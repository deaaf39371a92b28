//! Job status model and per-fetch snapshot.
//!
//! The remote service owns the job lifecycle entirely; the client only
//! observes fresh snapshots, one per fetch.

use serde::Deserialize;

/// Remote job lifecycle status.
///
/// The service reports `processing`, `completed`, or `failed`. Anything else
/// deserializes to [`JobStatus::Unknown`] and is treated as non-terminal, so
/// polling keeps going rather than tripping over a new intermediate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Check if this is a terminal (final) status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Check if this is the success status.
    pub fn is_success(&self) -> bool {
        *self == JobStatus::Completed
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One observation of a remote job.
///
/// `result` is populated only when the job completed, `error` only when it
/// failed; the client never mutates either.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSnapshot {
    pub status: JobStatus,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
