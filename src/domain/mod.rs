//! Domain layer - Chat jobs, provider contracts and payload extraction

pub mod chat;
pub mod error;
pub mod extract;
pub mod job;
pub mod llm;

pub use chat::{ChatMode, ChatRequest, ChatResult, ErrorKind};
pub use error::ChatError;
pub use extract::{extract_text, Extraction};
pub use job::{JobBackend, JobHandle, JobPoller, JobStatus, PollConfig};
pub use llm::{ChatProvider, GenerationParams};
