//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and upstream URLs
//! - Validate value ranges (timeouts > 0, token budget > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{AppConfig, StorageBackend};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::new("listener.max_body_bytes", "must be greater than 0"));
    }

    if config.storage.backend == StorageBackend::File && config.storage.data_dir.trim().is_empty() {
        errors.push(ValidationError::new(
            "storage.data_dir",
            "required for the file backend",
        ));
    }

    if let Err(e) = Url::parse(&config.ai.api_url) {
        errors.push(ValidationError::new("ai.api_url", e.to_string()));
    }
    if config.ai.model.trim().is_empty() {
        errors.push(ValidationError::new("ai.model", "must not be empty"));
    }
    if config.ai.max_tokens == 0 {
        errors.push(ValidationError::new("ai.max_tokens", "must be greater than 0"));
    }

    if let Err(e) = Url::parse(&config.email.api_url) {
        errors.push(ValidationError::new("email.api_url", e.to_string()));
    }
    if config.email.from.trim().is_empty() {
        errors.push(ValidationError::new("email.from", "must not be empty"));
    }
    if config.email.to.trim().is_empty() {
        errors.push(ValidationError::new("email.to", "must not be empty"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::new("timeouts.upstream_secs", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
