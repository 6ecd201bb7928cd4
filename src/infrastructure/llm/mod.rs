//! Provider adapters and the HTTP transport they share

mod async_job;
mod http_client;
mod sync_chat;

pub use async_job::AsyncJobAdapter;
pub use http_client::{HttpClient, HttpClientTrait, DEFAULT_HTTP_TIMEOUT, ERROR_BODY_EXCERPT_CHARS};
pub use sync_chat::{
    SyncChatAdapter, DEFAULT_CHAT_MODEL, DEFAULT_COMPLETIONS_URL, DEFAULT_SYSTEM_PROMPT,
};

#[cfg(test)]
pub use http_client::mock::{MockHttpClient, RecordedRequest};
