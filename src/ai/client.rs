//! HTTP client for the Anthropic messages API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::ai::{CompletionError, CompletionRequest, CompletionResponse, CompletionService};
use crate::config::AiConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Completion service speaking the messages API.
#[derive(Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AnthropicClient {
    /// Build a client for `config` authenticated with `api_key`.
    pub fn new(
        config: &AiConfig,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| CompletionError::NotConfigured(format!("invalid API key: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/v1/messages", config.api_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionService for AnthropicClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            max_tokens = request.max_tokens,
            "Sending completion request"
        );

        let res = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        res.json::<CompletionResponse>()
            .await
            .map_err(|e| CompletionError::Transport(format!("invalid response body: {e}")))
    }
}
