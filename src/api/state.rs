//! Application state shared by the handlers

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::infrastructure::services::ChatGateway;

/// Application state; cheap to clone
#[derive(Debug, Clone)]
pub struct AppState {
    pub gateway: Arc<ChatGateway>,
    /// Cancelled on server shutdown; each request runs under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(gateway: ChatGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            shutdown: CancellationToken::new(),
        }
    }
}
