use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::http_client::HttpClientTrait;
use crate::domain::extract::sample_payload;
use crate::domain::job::{JobBackend, JobHandle, StatusMethod, StatusReport, SubmittedJob};
use crate::domain::llm::GenerationParams;
use crate::domain::ChatError;

/// Job-queue inference provider (RunPod-style `/run` + `/status` endpoints)
#[derive(Debug)]
pub struct AsyncJobAdapter<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    submit_url: Url,
    status_base: Url,
    params: GenerationParams,
}

impl<C: HttpClientTrait> AsyncJobAdapter<C> {
    /// The status endpoints live next to the submit endpoint: its final path
    /// segment is replaced by `status`.
    pub fn new(client: C, submit_url: Url, api_key: impl AsRef<str>) -> Result<Self, ChatError> {
        let mut status_base = submit_url.clone();
        status_base.set_query(None);
        status_base.set_fragment(None);
        status_base
            .path_segments_mut()
            .map_err(|_| {
                ChatError::missing_configuration(format!(
                    "job endpoint '{}' cannot be used as a base URL",
                    submit_url
                ))
            })?
            .pop_if_empty()
            .pop()
            .push("status");

        Ok(Self {
            client,
            auth_header: format!("Bearer {}", api_key.as_ref()),
            submit_url,
            status_base,
            params: GenerationParams::default(),
        })
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// `{base}/status`
    pub fn status_url(&self) -> &Url {
        &self.status_base
    }

    /// `{base}/status/{id}`
    pub fn job_status_url(&self, job_id: &str) -> Url {
        let mut url = self.status_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(job_id);
        }
        url
    }

    fn build_request(&self, prompt: &str) -> Value {
        json!(SubmitRequest {
            input: JobInput {
                prompt,
                params: &self.params,
            },
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[async_trait]
impl<C: HttpClientTrait> JobBackend for AsyncJobAdapter<C> {
    async fn submit(&self, prompt: &str) -> Result<SubmittedJob, ChatError> {
        let body = self.build_request(prompt);
        let reply = self
            .client
            .post_json(self.submit_url.as_str(), self.headers(), &body)
            .await?;

        let job_id = match reply.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
            _ => {
                debug!(reply = %sample_payload(&reply), "Submit reply without job id");
                return Err(ChatError::protocol("no job id returned"));
            }
        };

        let initial = reply
            .get("status")
            .is_some()
            .then(|| StatusReport::from_json(&reply));

        Ok(SubmittedJob {
            handle: JobHandle::new(job_id),
            initial,
        })
    }

    async fn fetch_status(
        &self,
        handle: &JobHandle,
        method: StatusMethod,
    ) -> Result<StatusReport, ChatError> {
        let reply = match method {
            StatusMethod::Get => {
                let url = self.job_status_url(handle.id());
                self.client.get_json(url.as_str(), self.headers()).await?
            }
            StatusMethod::Post => {
                let body = json!({ "id": handle.id() });
                self.client
                    .post_json(self.status_base.as_str(), self.headers(), &body)
                    .await?
            }
        };

        Ok(StatusReport::from_json(&reply))
    }

    fn provider_name(&self) -> &'static str {
        "runpod"
    }
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    input: JobInput<'a>,
}

#[derive(Debug, Serialize)]
struct JobInput<'a> {
    prompt: &'a str,
    #[serde(flatten)]
    params: &'a GenerationParams,
}
