//! Bounded-duration polling loop for remote jobs.
//!
//! One tick = timeout check, then (if the deadline has not passed) one fetch
//! and a status evaluation. The loop resolves exactly once: to the completed
//! result, the job's failure, a fetch error, or a timeout. Fetch errors are
//! not retried; the first terminal observation ends the loop.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::errors::KeywordError;
use crate::job::{JobSnapshot, JobStatus};
use crate::transport::JobTransport;

/// Configuration for a polling loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between consecutive fetches.
    pub interval: Duration,
    /// Overall deadline; a zero timeout times out on the first tick.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
            timeout: Duration::from_millis(60000),
        }
    }
}

impl PollConfig {
    /// Create a poll config from millisecond values.
    pub fn new(interval_ms: u64, timeout_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

/// Hook into the poll loop's transitions.
///
/// The loop stays silent apart from `tracing` output, so tests (and callers
/// that want progress reporting) observe ticks through this trait instead of
/// captured logs. All methods default to no-ops.
pub trait PollObserver: Send + Sync {
    /// Called after each successful fetch with the observed status.
    fn on_tick(&self, _job_id: &str, _status: JobStatus) {}

    /// Called when the deadline elapses before a terminal status.
    fn on_timeout(&self, _job_id: &str, _elapsed: Duration) {}
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PollObserver for NoopObserver {}

/// What a single status evaluation decided.
enum Step {
    Done(String),
    Fail(KeywordError),
    Continue,
}

fn evaluate(snapshot: JobSnapshot) -> Step {
    if !snapshot.status.is_terminal() {
        return Step::Continue;
    }
    if snapshot.status.is_success() {
        // The service may complete a job with a null result; surface it as
        // an empty string rather than pushing the Option onto every caller.
        Step::Done(snapshot.result.unwrap_or_default())
    } else {
        Step::Fail(KeywordError::job_failed(snapshot.error))
    }
}

/// Poll a job until it reaches a terminal state or the deadline elapses.
///
/// The deadline is checked before each fetch, so a zero timeout returns
/// `PollTimeout` without touching the network. Fetches within one call are
/// strictly sequential; the next tick is only scheduled after the previous
/// fetch and its evaluation finished.
pub async fn poll_job<T: JobTransport + ?Sized>(
    transport: &T,
    job_id: &str,
    config: &PollConfig,
    observer: &dyn PollObserver,
) -> Result<String, KeywordError> {
    let started = Instant::now();
    let timeout_ms = config.timeout.as_millis() as u64;

    loop {
        let elapsed = started.elapsed();
        if elapsed >= config.timeout {
            warn!(
                job_id,
                elapsed_ms = elapsed.as_millis() as u64,
                timeout_ms,
                "polling timed out"
            );
            observer.on_timeout(job_id, elapsed);
            return Err(KeywordError::PollTimeout { timeout_ms });
        }

        let snapshot = match transport.fetch_job(job_id).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(job_id, error = %err, "fetch failed, stopping poll");
                return Err(err);
            }
        };

        debug!(job_id, status = %snapshot.status, "poll tick");
        observer.on_tick(job_id, snapshot.status);

        match evaluate(snapshot) {
            Step::Done(result) => return Ok(result),
            Step::Fail(err) => return Err(err),
            Step::Continue => sleep(config.interval).await,
        }
    }
}
