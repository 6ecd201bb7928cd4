//! Job poller - drives one async job from submission to a terminal state

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::backend::{JobBackend, StatusMethod, SubmittedJob};
use super::status::{JobHandle, JobStatus, StatusReport};
use crate::domain::error::ChatError;
use crate::domain::extract::Extraction;

/// Default number of status checks before giving up
pub const DEFAULT_MAX_POLL_CYCLES: u32 = 45;

/// Default delay between status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Poll cadence and deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Maximum number of status checks; the delays between them count against it
    pub max_cycles: u32,
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_POLL_CYCLES,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PollConfig {
    pub fn with_max_cycles(mut self, max_cycles: u32) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Submits a prompt as a job and polls it until it completes, fails or times out
#[derive(Debug, Clone)]
pub struct JobPoller {
    backend: Arc<dyn JobBackend>,
    config: PollConfig,
}

impl JobPoller {
    pub fn new(backend: Arc<dyn JobBackend>, config: PollConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Run one job to a terminal state.
    ///
    /// `Ok` means the provider completed the job; the extraction may still be
    /// unparsable. Provider failures, timeouts and cancellation are `Err`.
    pub async fn run(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<Extraction, ChatError> {
        let SubmittedJob { handle, initial } =
            until_cancelled(cancel, self.backend.submit(prompt)).await??;

        info!(
            provider = self.backend.provider_name(),
            job_id = %handle,
            "Job submitted"
        );

        if let Some(settled) = initial.and_then(|report| settle(&handle, report)) {
            return settled;
        }

        self.poll(&handle, cancel).await
    }

    async fn poll(
        &self,
        handle: &JobHandle,
        cancel: &CancellationToken,
    ) -> Result<Extraction, ChatError> {
        let max_cycles = self.config.max_cycles;

        for cycle in 1..=max_cycles {
            if cancel.is_cancelled() {
                info!(job_id = %handle, cycle, "Polling cancelled");
                return Err(ChatError::Cancelled);
            }

            let report = until_cancelled(cancel, self.fetch_status(handle)).await??;

            debug!(job_id = %handle, cycle, status = %report.status, "Job status");

            if let Some(settled) = settle(handle, report) {
                return settled;
            }

            if cycle < max_cycles {
                until_cancelled(cancel, tokio::time::sleep(self.config.interval)).await?;
            }
        }

        warn!(
            job_id = %handle,
            cycles = max_cycles,
            elapsed_ms = handle.elapsed_ms(),
            "Job did not reach a terminal status"
        );

        Err(ChatError::PollTimeout { cycles: max_cycles })
    }

    /// GET first; POST only when the GET itself failed
    async fn fetch_status(&self, handle: &JobHandle) -> Result<StatusReport, ChatError> {
        match self.backend.fetch_status(handle, StatusMethod::Get).await {
            Err(error) if error.is_request_failure() => {
                debug!(job_id = %handle, error = %error, "GET status failed, trying POST");
                self.backend.fetch_status(handle, StatusMethod::Post).await
            }
            other => other,
        }
    }
}

/// Terminal outcome for a report, or `None` to keep polling
fn settle(handle: &JobHandle, report: StatusReport) -> Option<Result<Extraction, ChatError>> {
    match report.status {
        JobStatus::Completed => {
            let extraction = Extraction::from_payload(&report.output);

            if let Extraction::Unparsable { ref sample } = extraction {
                warn!(job_id = %handle, sample = %sample, "Completed job output has no text");
            }

            info!(job_id = %handle, elapsed_ms = handle.elapsed_ms(), "Job completed");
            Some(Ok(extraction))
        }
        JobStatus::Failed | JobStatus::Cancelled => {
            warn!(job_id = %handle, status = %report.status, "Job ended without output");
            Some(Err(ChatError::job_failed(
                report.status.as_str(),
                report.error,
            )))
        }
        JobStatus::Queued | JobStatus::InProgress | JobStatus::Other(_) => None,
    }
}

/// Race a future against cancellation
async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    future: F,
) -> Result<F::Output, ChatError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ChatError::Cancelled),
        output = future => Ok(output),
    }
}
