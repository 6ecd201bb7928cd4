use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::error::ChatError;
use crate::domain::extract::Extraction;

/// Provider answering a prompt with a single chat-completion call
#[async_trait]
pub trait ChatProvider: Send + Sync + Debug {
    /// Send the prompt and extract the reply text
    async fn complete(&self, prompt: &str) -> Result<Extraction, ChatError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
