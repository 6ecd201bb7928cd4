use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which provider family serves a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Single chat-completion call
    #[default]
    Sync,

    /// Submitted as a job and polled until it finishes
    AsyncJob,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::AsyncJob => "async_job",
        }
    }

    /// Resolve an optional client-supplied mode, falling back to [`ChatMode::Sync`]
    pub fn resolve(mode: Option<&str>) -> Self {
        match mode.map(str::trim).filter(|m| !m.is_empty()) {
            None => Self::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(mode = %raw, "Unknown chat mode, using sync");
                Self::default()
            }),
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chat mode '{}'", self.0)
    }
}

impl std::error::Error for UnknownMode {}

impl FromStr for ChatMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sync" | "cuidadoso" => Ok(Self::Sync),
            "async_job" | "async" | "libre" => Ok(Self::AsyncJob),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// A validated chat message: the prompt is trimmed and never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    prompt: String,
    mode: ChatMode,
}

impl ChatRequest {
    /// Returns `None` when the prompt is blank
    pub fn new(prompt: &str, mode: ChatMode) -> Option<Self> {
        let prompt = prompt.trim();

        if prompt.is_empty() {
            return None;
        }

        Some(Self {
            prompt: prompt.to_string(),
            mode,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }
}
