//! Chat gateway - one entry point over both provider families

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::GatewayConfig;
use crate::domain::chat::{ChatMode, ChatRequest, ChatResult};
use crate::domain::extract::Extraction;
use crate::domain::job::{JobBackend, JobPoller};
use crate::domain::llm::ChatProvider;
use crate::domain::ChatError;
use crate::infrastructure::llm::{AsyncJobAdapter, HttpClientTrait, SyncChatAdapter};

/// Routes chat messages to the provider for their mode and turns every
/// outcome into a [`ChatResult`]
#[derive(Debug, Clone)]
pub struct ChatGateway {
    chat_provider: Result<Arc<dyn ChatProvider>, ChatError>,
    job_poller: Result<JobPoller, ChatError>,
}

impl ChatGateway {
    /// A provider slot holding an error reports it as the result of every
    /// request in that mode
    pub fn new(
        chat_provider: Result<Arc<dyn ChatProvider>, ChatError>,
        job_poller: Result<JobPoller, ChatError>,
    ) -> Self {
        Self {
            chat_provider,
            job_poller,
        }
    }

    /// Build both adapters over a shared HTTP client
    pub fn from_config(config: &GatewayConfig, client: Arc<dyn HttpClientTrait>) -> Self {
        let chat_provider = config.chat.validate().map(|provider| {
            let adapter = SyncChatAdapter::with_completions_url(
                client.clone(),
                &provider.api_key,
                provider.endpoint.as_str(),
            )
            .with_model(&config.chat_model)
            .with_system_prompt(&config.system_prompt);

            Arc::new(adapter) as Arc<dyn ChatProvider>
        });

        let job_poller = config.jobs.validate().and_then(|provider| {
            let adapter = AsyncJobAdapter::new(client, provider.endpoint, &provider.api_key)?
                .with_params(config.request_defaults.clone());

            Ok(JobPoller::new(
                Arc::new(adapter) as Arc<dyn JobBackend>,
                config.poll,
            ))
        });

        for (mode, slot) in [
            (ChatMode::Sync, chat_provider.as_ref().err()),
            (ChatMode::AsyncJob, job_poller.as_ref().err()),
        ] {
            if let Some(error) = slot {
                warn!(mode = %mode, error = %error, "Chat mode unavailable");
            }
        }

        Self::new(chat_provider, job_poller)
    }

    /// Whether the mode has everything it needs to reach its provider
    pub fn is_available(&self, mode: ChatMode) -> bool {
        match mode {
            ChatMode::Sync => self.chat_provider.is_ok(),
            ChatMode::AsyncJob => self.job_poller.is_ok(),
        }
    }

    /// Run one chat message to completion. Never fails: every error becomes
    /// a [`ChatResult`].
    pub async fn run_chat_job(
        &self,
        prompt: &str,
        mode: ChatMode,
        cancel: &CancellationToken,
    ) -> ChatResult {
        let Some(request) = ChatRequest::new(prompt, mode) else {
            debug!(mode = %mode, "Empty prompt, nothing to send");
            return ChatResult::empty_input();
        };

        let start = Instant::now();
        info!(
            mode = %mode,
            prompt_chars = request.prompt().chars().count(),
            "Running chat job"
        );

        let outcome = AssertUnwindSafe(self.dispatch(&request, cancel))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                error!(mode = %mode, "Provider call panicked");
                Err(ChatError::transport("internal error while contacting the provider"))
            });

        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(extraction) => {
                let result = ChatResult::from(extraction);
                info!(mode = %mode, latency_ms, kind = ?result.kind(), "Chat job finished");
                result
            }
            Err(e) => {
                warn!(mode = %mode, latency_ms, error = %e, "Chat job failed");
                ChatResult::from(e)
            }
        }
    }

    async fn dispatch(
        &self,
        request: &ChatRequest,
        cancel: &CancellationToken,
    ) -> Result<Extraction, ChatError> {
        match request.mode() {
            ChatMode::Sync => {
                let provider = self.chat_provider.as_ref().map_err(Clone::clone)?;

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(ChatError::Cancelled),
                    outcome = provider.complete(request.prompt()) => outcome,
                }
            }
            ChatMode::AsyncJob => {
                let poller = self.job_poller.as_ref().map_err(Clone::clone)?;
                poller.run(request.prompt(), cancel).await
            }
        }
    }
}
