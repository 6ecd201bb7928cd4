//! API request/response types

pub mod chat;
pub mod json;

pub use chat::{ChatMessageRequest, ChatMessageResponse, StatusMessage};
pub use json::Json;
