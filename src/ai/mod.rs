//! Upstream completion service.
//!
//! # Data Flow
//! ```text
//! ai-edit handler
//!     → prompt.rs (build prompt from instruction + current HTML)
//!     → CompletionService::complete (client.rs over HTTPS)
//!     → prompt.rs (strip fences / wrapper tag, trim)
//!     → new schedule HTML
//! ```
//!
//! # Design Decisions
//! - Single-turn requests only, bounded by `max_tokens`
//! - Non-success upstream statuses keep the upstream body for the caller
//! - No retries

pub mod client;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::AnthropicClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

/// One segment of generated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// Response body returned by the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl CompletionResponse {
    /// Text of the first content segment, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|b| b.text.as_str())
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The service answered with a non-success status.
    #[error("completion service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a usable response.
    #[error("completion transport error: {0}")]
    Transport(String),

    #[error("completion service is not configured: {0}")]
    NotConfigured(String),
}

impl CompletionError {
    /// Text surfaced to API callers as `details`.
    pub fn details(&self) -> String {
        match self {
            CompletionError::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;
}

/// Stand-in used when no API key is configured.
#[derive(Debug, Clone)]
pub struct UnconfiguredCompletion {
    pub key_env: String,
}

#[async_trait]
impl CompletionService for UnconfiguredCompletion {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        Err(CompletionError::NotConfigured(format!(
            "{} is not set",
            self.key_env
        )))
    }
}
