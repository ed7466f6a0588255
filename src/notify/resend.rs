//! HTTP client for the Resend email API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::config::EmailConfig;
use crate::notify::{EmailMessage, Notifier, NotifyError};

#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ResendClient {
    pub fn new(
        config: &EmailConfig,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| NotifyError::Transport(format!("invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.api_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Notifier for ResendClient {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&message)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(NotifyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
