//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the configured store
//! - Read API credentials from the environment
//! - Build the completion and email clients
//!
//! # Design Decisions
//! - Fail fast: a store that cannot be opened is fatal
//! - A missing AI key is not fatal; ai-edit answers 502 until it is set
//! - A missing email key disables notifications

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::ai::{AnthropicClient, CompletionError, CompletionService, UnconfiguredCompletion};
use crate::config::{AppConfig, StorageBackend};
use crate::http::AppState;
use crate::notify::{Notifier, NotifyError, ResendClient};
use crate::store::{FileStore, KvStore, MemoryStore, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),

    #[error("failed to build completion client: {0}")]
    Completion(#[from] CompletionError),

    #[error("failed to build email client: {0}")]
    Email(#[from] NotifyError),
}

/// Read a non-empty secret from the environment.
fn secret(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn KvStore>, StoreError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => Ok(Arc::new(FileStore::open(&config.storage.data_dir).await?)),
    }
}

/// Build the application state for `config`.
pub async fn bootstrap(config: &AppConfig) -> Result<AppState, StartupError> {
    let store = open_store(config).await?;
    let upstream_timeout = Duration::from_secs(config.timeouts.upstream_secs);

    let completion: Arc<dyn CompletionService> = match secret(&config.ai.api_key_env) {
        Some(key) => Arc::new(AnthropicClient::new(&config.ai, &key, upstream_timeout)?),
        None => {
            tracing::warn!(env = %config.ai.api_key_env, "AI key not set; ai-edit disabled");
            Arc::new(UnconfiguredCompletion {
                key_env: config.ai.api_key_env.clone(),
            })
        }
    };

    let notifier: Option<Arc<dyn Notifier>> = match secret(&config.email.api_key_env) {
        Some(key) => {
            let client = ResendClient::new(&config.email, &key, upstream_timeout)?;
            Some(Arc::new(client) as Arc<dyn Notifier>)
        }
        None => {
            tracing::info!(
                env = %config.email.api_key_env,
                "Email key not set; notifications disabled"
            );
            None
        }
    };

    tracing::info!(
        storage = ?config.storage.backend,
        model = %config.ai.model,
        notifications = notifier.is_some(),
        comments = config.routes.comments_enabled,
        "Subsystems initialized"
    );

    Ok(AppState::new(config, store, completion, notifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_without_secrets() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.ai.api_key_env = "TRIP_PLANNER_TEST_UNSET_AI_KEY".into();
        config.email.api_key_env = "TRIP_PLANNER_TEST_UNSET_EMAIL_KEY".into();

        let state = bootstrap(&config).await.unwrap();
        assert!(state.notifier.is_none());

        let err = state
            .completion
            .complete(crate::ai::CompletionRequest {
                model: "m".into(),
                max_tokens: 1,
                messages: vec![],
            })
            .await
            .unwrap_err();
        assert!(err.details().contains("TRIP_PLANNER_TEST_UNSET_AI_KEY"));
    }

    #[tokio::test]
    async fn test_file_backend_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.data_dir = dir.path().join("nested").display().to_string();

        let store = open_store(&config).await.unwrap();
        store.put("spa-selections", "{}".into()).await.unwrap();
        assert!(dir.path().join("nested/spa-selections.json").exists());
    }
}
