use std::fmt;

use serde::Serialize;

use crate::domain::error::ChatError;
use crate::domain::extract::Extraction;

/// Visible prefix for failures rendered as assistant text
pub const ERROR_MARKER: &str = "⚠️";

/// Category of a non-text chat result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    MissingConfiguration,
    ProviderHttpError,
    ProviderProtocolError,
    PollTimeout,
    ProviderJobFailed,
    UnparsableOutput,
    TransportError,
    TransportTimeout,
    Cancelled,
}

impl ErrorKind {
    /// Informational kinds are shown without the error marker
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::UnparsableOutput)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EmptyInput => "empty_input",
            Self::MissingConfiguration => "missing_configuration",
            Self::ProviderHttpError => "provider_http_error",
            Self::ProviderProtocolError => "provider_protocol_error",
            Self::PollTimeout => "poll_timeout",
            Self::ProviderJobFailed => "provider_job_failed",
            Self::UnparsableOutput => "unparsable_output",
            Self::TransportError => "transport_error",
            Self::TransportTimeout => "transport_timeout",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// The single output of a chat job: a reply, or a kind plus detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatResult {
    Reply { text: String },
    Failure { kind: ErrorKind, detail: String },
}

impl ChatResult {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply { text: text.into() }
    }

    pub fn failure(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            detail: detail.into(),
        }
    }

    pub fn empty_input() -> Self {
        Self::failure(ErrorKind::EmptyInput, "Please type a message first.")
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Reply { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn is_reply(&self) -> bool {
        matches!(self, Self::Reply { .. })
    }

    /// Text shown to the user as the assistant's answer
    pub fn render(&self) -> String {
        match self {
            Self::Reply { text } => text.clone(),
            Self::Failure { kind, detail } if kind.is_informational() => detail.clone(),
            Self::Failure { detail, .. } => format!("{} {}", ERROR_MARKER, detail),
        }
    }
}

impl From<Extraction> for ChatResult {
    fn from(extraction: Extraction) -> Self {
        match extraction {
            Extraction::Text(text) => Self::reply(text),
            Extraction::Unparsable { sample } => Self::failure(
                ErrorKind::UnparsableOutput,
                format!(
                    "The model answered, but the reply could not be read as text. Raw output: {}",
                    sample
                ),
            ),
        }
    }
}

impl From<ChatError> for ChatResult {
    fn from(error: ChatError) -> Self {
        match error {
            ChatError::EmptyInput => Self::empty_input(),
            ChatError::MissingConfiguration { message } => Self::failure(
                ErrorKind::MissingConfiguration,
                format!("The chat service is not configured: {}", message),
            ),
            ChatError::ProviderHttp {
                status,
                body_excerpt,
            } => Self::failure(
                ErrorKind::ProviderHttpError,
                format!("The model provider returned HTTP {}: {}", status, body_excerpt),
            ),
            ChatError::ProviderProtocol { reason } => Self::failure(
                ErrorKind::ProviderProtocolError,
                format!("Unexpected reply from the model provider: {}", reason),
            ),
            ChatError::PollTimeout { cycles } => Self::failure(
                ErrorKind::PollTimeout,
                format!(
                    "The model did not finish in time (gave up after {} status checks).",
                    cycles
                ),
            ),
            ChatError::ProviderJobFailed { status, detail } => {
                let message = match detail {
                    Some(detail) => format!("The model job ended with status {}: {}", status, detail),
                    None => format!("The model job ended with status {}.", status),
                };
                Self::failure(ErrorKind::ProviderJobFailed, message)
            }
            ChatError::Transport { message } => Self::failure(
                ErrorKind::TransportError,
                format!("Could not reach the model provider: {}", message),
            ),
            ChatError::TransportTimeout { message } => Self::failure(
                ErrorKind::TransportTimeout,
                format!("The model provider did not answer in time: {}", message),
            ),
            ChatError::Cancelled => {
                Self::failure(ErrorKind::Cancelled, "The request was cancelled.")
            }
        }
    }
}
