use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::http_client::HttpClientTrait;
use crate::domain::extract::Extraction;
use crate::domain::llm::{ChatProvider, Message};
use crate::domain::ChatError;

pub const DEFAULT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "openchat/openchat-3.5";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Netabot, a friendly and helpful assistant.";

/// OpenAI-style chat-completion provider answered in a single call
#[derive(Debug)]
pub struct SyncChatAdapter<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    completions_url: String,
    model: String,
    system_prompt: String,
}

impl<C: HttpClientTrait> SyncChatAdapter<C> {
    pub fn new(client: C, api_key: impl AsRef<str>) -> Self {
        Self::with_completions_url(client, api_key, DEFAULT_COMPLETIONS_URL)
    }

    pub fn with_completions_url(
        client: C,
        api_key: impl AsRef<str>,
        completions_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.as_ref()),
            completions_url: completions_url.into(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    fn build_request(&self, prompt: &str) -> serde_json::Value {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![Message::system(&self.system_prompt), Message::user(prompt)],
        };

        serde_json::json!(request)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> ChatProvider for SyncChatAdapter<C> {
    async fn complete(&self, prompt: &str) -> Result<Extraction, ChatError> {
        let body = self.build_request(prompt);

        debug!(model = %self.model, "Sending chat completion");

        let reply = self
            .client
            .post_json(&self.completions_url, self.headers(), &body)
            .await?;

        Ok(Extraction::from_payload(&reply))
    }

    fn provider_name(&self) -> &'static str {
        "openrouter"
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_chat_completion_reply() {
        let client = Arc::new(MockHttpClient::new().with_post(
            DEFAULT_COMPLETIONS_URL,
            json!({
                "id": "gen-1",
                "choices": [{ "message": { "role": "assistant", "content": "hi there" } }]
            }),
        ));
        let adapter = SyncChatAdapter::new(client.clone(), "or-key");

        let result = adapter.complete("hello").await;

        assert_eq!(result, Ok(Extraction::Text("hi there".to_string())));

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            Some(json!({
                "model": DEFAULT_CHAT_MODEL,
                "messages": [
                    { "role": "system", "content": DEFAULT_SYSTEM_PROMPT },
                    { "role": "user", "content": "hello" }
                ]
            }))
        );
        assert!(requests[0]
            .headers
            .contains(&("Authorization".to_string(), "Bearer or-key".to_string())));
    }

    #[tokio::test]
    async fn test_custom_model_and_persona() {
        let url = "http://localhost:9000/v1/chat/completions";
        let client = Arc::new(
            MockHttpClient::new().with_post(url, json!({ "choices": [{ "text": "legacy" }] })),
        );
        let adapter = SyncChatAdapter::with_completions_url(client.clone(), "k", url)
            .with_model("mistral-7b")
            .with_system_prompt("Eres un asistente útil.");

        let result = adapter.complete("hola").await;

        assert_eq!(result, Ok(Extraction::Text("legacy".to_string())));
        let body = client.requests()[0].body.clone().unwrap();
        assert_eq!(body["model"], "mistral-7b");
        assert_eq!(body["messages"][0]["content"], "Eres un asistente útil.");
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_unparsable() {
        let client = MockHttpClient::new().with_post(
            DEFAULT_COMPLETIONS_URL,
            json!({ "error": { "code": 429 } }),
        );
        let adapter = SyncChatAdapter::new(client, "k");

        let result = adapter.complete("hello").await.unwrap();

        assert!(matches!(result, Extraction::Unparsable { .. }));
    }

    #[tokio::test]
    async fn test_http_error_is_propagated() {
        let client = MockHttpClient::new().with_post_error(
            DEFAULT_COMPLETIONS_URL,
            ChatError::provider_http(401, "No auth credentials found"),
        );
        let adapter = SyncChatAdapter::new(client, "bad");

        let result = adapter.complete("hello").await;

        assert_eq!(
            result,
            Err(ChatError::provider_http(401, "No auth credentials found"))
        );
    }
}
