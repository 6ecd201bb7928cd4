//! Asynchronous job lifecycle: submission, status checks and polling

mod backend;
mod poller;
mod status;

#[cfg(test)]
pub use backend::mock;
pub use backend::{JobBackend, StatusMethod, SubmittedJob};
pub use poller::{JobPoller, PollConfig, DEFAULT_MAX_POLL_CYCLES, DEFAULT_POLL_INTERVAL};
pub use status::{JobHandle, JobStatus, StatusReport};
