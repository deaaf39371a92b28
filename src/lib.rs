//! Async client for the find-best-keyword job API.
//!
//! The service runs keyword searches as asynchronous jobs: a `POST` creates
//! a job and returns its id, a `GET` reports the job's current snapshot.
//! This crate wraps those two calls and adds the piece with actual design
//! weight, a bounded polling loop that waits for the job to reach a terminal
//! state:
//! - `KeywordClient` for the public operations (start, fetch, poll, run)
//! - a `JobTransport` seam so the poller is testable without a server
//! - `PollConfig`/`PollObserver` to tune and observe a poll
//! - a unified `KeywordError` taxonomy; no operation panics on failure
//!
//! ```ignore
//! use keyword_jobs::KeywordClient;
//!
//! let client = KeywordClient::new(None)?;
//! let keyword = client.run("best keyword for rust http clients").await?;
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod job;
pub mod polling;
pub mod transport;

// Re-export core types at crate root for convenience
pub use client::{KeywordClient, FIND_BEST_KEYWORD_ENDPOINT};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use errors::{KeywordError, KeywordResult};
pub use job::{JobSnapshot, JobStatus};
pub use polling::{poll_job, NoopObserver, PollConfig, PollObserver};
pub use transport::JobTransport;
