//! LLM provider domain models and traits

mod message;
mod provider;
mod request;

pub use message::{Message, MessageRole};
pub use provider::ChatProvider;
pub use request::GenerationParams;

#[cfg(test)]
pub use provider::mock::MockChatProvider;
