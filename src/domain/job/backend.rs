use std::fmt::Debug;

use async_trait::async_trait;

use super::status::{JobHandle, StatusReport};
use crate::domain::error::ChatError;

/// HTTP verb used for a status check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMethod {
    /// `GET {base}/status/{id}`
    Get,
    /// `POST {base}/status` with `{"id": ...}`
    Post,
}

/// Result of a job submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedJob {
    pub handle: JobHandle,
    /// Status carried by the submission reply itself, if any
    pub initial: Option<StatusReport>,
}

/// Provider that runs prompts as asynchronous jobs
#[async_trait]
pub trait JobBackend: Send + Sync + Debug {
    /// Submit a prompt and obtain the provider's job id
    async fn submit(&self, prompt: &str) -> Result<SubmittedJob, ChatError>;

    /// Fetch the current status of a job
    async fn fetch_status(
        &self,
        handle: &JobHandle,
        method: StatusMethod,
    ) -> Result<StatusReport, ChatError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
