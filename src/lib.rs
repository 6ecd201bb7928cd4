//! Netabot chat gateway
//!
//! One chat endpoint in front of two kinds of LLM provider:
//! - a synchronous chat-completions API (`sync` mode)
//! - an asynchronous job queue that is submitted to and polled (`async_job` mode)
//!
//! Every failure is turned into a reply the frontend can show.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{AppConfig, GatewayConfig};
pub use domain::{ChatMode, ChatResult};
pub use infrastructure::services::ChatGateway;

use std::sync::Arc;

use tracing::info;

use infrastructure::llm::HttpClient;

/// Build the gateway over a real HTTP client.
///
/// Missing provider settings do not fail here; the affected mode reports them
/// per request.
pub fn create_gateway(config: &GatewayConfig) -> anyhow::Result<ChatGateway> {
    let client = HttpClient::with_timeout(config.http_timeout)?;

    let gateway = ChatGateway::from_config(config, Arc::new(client));
    info!(
        sync = gateway.is_available(ChatMode::Sync),
        async_job = gateway.is_available(ChatMode::AsyncJob),
        timeout_secs = config.http_timeout.as_secs(),
        "Chat gateway ready"
    );

    Ok(gateway)
}
