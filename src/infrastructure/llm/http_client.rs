use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::extract::excerpt;
use crate::domain::ChatError;

/// Maximum characters of an error body kept in [`ChatError::ProviderHttp`]
pub const ERROR_BODY_EXCERPT_CHARS: usize = 200;

/// Default per-call transport timeout
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ChatError>;

    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, ChatError>;
}

#[async_trait]
impl<T: HttpClientTrait + ?Sized> HttpClientTrait for Arc<T> {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ChatError> {
        (**self).post_json(url, headers, body).await
    }

    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, ChatError> {
        (**self).get_json(url, headers).await
    }
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<serde_json::Value, ChatError> {
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ChatError::provider_http(
                status.as_u16(),
                excerpt(error_body.trim(), ERROR_BODY_EXCERPT_CHARS),
            ));
        }

        let body = response.text().await.map_err(transport_error)?;

        serde_json::from_str(&body).map_err(|e| {
            ChatError::protocol(format!(
                "Failed to parse response: {} (body: {})",
                e,
                excerpt(body.trim(), ERROR_BODY_EXCERPT_CHARS)
            ))
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn transport_error(error: reqwest::Error) -> ChatError {
    if error.is_timeout() {
        ChatError::transport_timeout(format!("Request timed out: {}", error))
    } else {
        ChatError::transport(format!("Request failed: {}", error))
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ChatError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.send(request.json(body)).await
    }

    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, ChatError> {
        let mut request = self.client.get(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.send(request).await
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// A request seen by the mock
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub headers: Vec<(String, String)>,
        pub body: Option<serde_json::Value>,
    }

    /// Scripted HTTP client. Replies are queued per method and URL; the last
    /// reply for a route is repeated once the queue runs dry.
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        routes: Mutex<HashMap<(&'static str, String), VecDeque<Result<serde_json::Value, ChatError>>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_post(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.push("POST", url.into(), Ok(response))
        }

        pub fn with_post_error(self, url: impl Into<String>, error: ChatError) -> Self {
            self.push("POST", url.into(), Err(error))
        }

        pub fn with_get(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.push("GET", url.into(), Ok(response))
        }

        pub fn with_get_error(self, url: impl Into<String>, error: ChatError) -> Self {
            self.push("GET", url.into(), Err(error))
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn count(&self, method: &str, url: &str) -> usize {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.method == method && r.url == url)
                .count()
        }

        fn push(
            self,
            method: &'static str,
            url: String,
            reply: Result<serde_json::Value, ChatError>,
        ) -> Self {
            self.routes
                .lock()
                .unwrap()
                .entry((method, url))
                .or_default()
                .push_back(reply);
            self
        }

        fn respond(
            &self,
            method: &'static str,
            url: &str,
            headers: Vec<(&str, &str)>,
            body: Option<&serde_json::Value>,
        ) -> Result<serde_json::Value, ChatError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                url: url.to_string(),
                headers: headers
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.cloned(),
            });

            let mut routes = self.routes.lock().unwrap();
            let Some(queue) = routes.get_mut(&(method, url.to_string())) else {
                return Err(ChatError::transport(format!(
                    "No mock response for {} {}",
                    method, url
                )));
            };

            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn post_json(
            &self,
            url: &str,
            headers: Vec<(&str, &str)>,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, ChatError> {
            self.respond("POST", url, headers, Some(body))
        }

        async fn get_json(
            &self,
            url: &str,
            headers: Vec<(&str, &str)>,
        ) -> Result<serde_json::Value, ChatError> {
            self.respond("GET", url, headers, None)
        }
    }
}
