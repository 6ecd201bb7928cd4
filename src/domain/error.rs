use thiserror::Error;

/// Failures a chat job can run into on its way to a provider and back
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Missing configuration: {message}")]
    MissingConfiguration { message: String },

    #[error("Provider returned HTTP {status}: {body_excerpt}")]
    ProviderHttp { status: u16, body_excerpt: String },

    #[error("Provider protocol error: {reason}")]
    ProviderProtocol { reason: String },

    #[error("Job did not finish after {cycles} status checks")]
    PollTimeout { cycles: u32 },

    #[error("Job ended with status {status}")]
    ProviderJobFailed {
        status: String,
        detail: Option<String>,
    },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("HTTP call timed out: {message}")]
    TransportTimeout { message: String },

    #[error("Request cancelled")]
    Cancelled,
}

impl ChatError {
    pub fn missing_configuration(message: impl Into<String>) -> Self {
        Self::MissingConfiguration {
            message: message.into(),
        }
    }

    pub fn provider_http(status: u16, body_excerpt: impl Into<String>) -> Self {
        Self::ProviderHttp {
            status,
            body_excerpt: body_excerpt.into(),
        }
    }

    pub fn protocol(reason: impl Into<String>) -> Self {
        Self::ProviderProtocol {
            reason: reason.into(),
        }
    }

    pub fn job_failed(status: impl Into<String>, detail: Option<String>) -> Self {
        Self::ProviderJobFailed {
            status: status.into(),
            detail,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn transport_timeout(message: impl Into<String>) -> Self {
        Self::TransportTimeout {
            message: message.into(),
        }
    }

    /// Whether the failure happened below HTTP semantics or as a non-2xx reply.
    ///
    /// The poller uses this to decide whether the POST status fallback is worth a try.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::ProviderHttp { .. } | Self::Transport { .. } | Self::TransportTimeout { .. }
        )
    }
}
