use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::extract::{excerpt, extract_text};

/// Maximum characters kept from a provider-reported job error
const JOB_ERROR_EXCERPT_CHARS: usize = 200;

/// Provider-issued identifier of a submitted job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    id: String,
    submitted_at: DateTime<Utc>,
}

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            submitted_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Milliseconds since submission
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.submitted_at).num_milliseconds()
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Job status in the provider's vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    /// Anything the provider reports that we do not know about
    Other(String),
}

impl JobStatus {
    /// Parse a provider status string; matching ignores case
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "QUEUED" | "IN_QUEUE" => Self::Queued,
            "IN_PROGRESS" => Self::InProgress,
            "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "QUEUED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Other(raw) => raw,
        }
    }

    /// No further polling happens once a job reaches a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded status-check reply
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub status: JobStatus,
    pub output: Value,
    pub error: Option<String>,
}

impl StatusReport {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            output: Value::Null,
            error: None,
        }
    }

    pub fn with_output(mut self, output: Value) -> Self {
        self.output = output;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Decode a status reply body. A missing status counts as unrecognized.
    pub fn from_json(body: &Value) -> Self {
        let reply = StatusReply::deserialize(body).unwrap_or_default();

        Self {
            status: JobStatus::parse(reply.status.as_deref().unwrap_or_default()),
            output: reply.output,
            error: reply
                .error
                .as_ref()
                .and_then(extract_text)
                .map(|error| excerpt(&error, JOB_ERROR_EXCERPT_CHARS)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatusReply {
    status: Option<String>,
    output: Value,
    error: Option<Value>,
}
