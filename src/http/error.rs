//! API error type and its mapping to HTTP responses.
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `BadRequest` | 400 | `{error}` |
//! | `NotFound` | 404 | `{error: "Not found"}` |
//! | `PayloadTooLarge` | 413 | `{error}` |
//! | `Upstream` | 502 | `{error, details}` |
//! | `Store`, `Json` | 500 | `{error, details}` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field was missing or empty.
    #[error("{0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Request body too large")]
    PayloadTooLarge,

    /// The completion service failed or answered with an error.
    #[error("AI service error: {details}")]
    Upstream { details: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A request body or stored record was not valid JSON for its shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Store(_) | ApiError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::BadRequest(message) => json!({ "error": message }),
            ApiError::NotFound | ApiError::PayloadTooLarge => json!({ "error": self.to_string() }),
            ApiError::Upstream { details } => json!({
                "error": "AI service error",
                "details": details,
            }),
            ApiError::Store(e) => json!({
                "error": "Internal error",
                "details": e.to_string(),
            }),
            ApiError::Json(e) => json!({
                "error": "Internal error",
                "details": e.to_string(),
            }),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_upstream_carries_details() {
        let (status, body) = body_json(ApiError::Upstream {
            details: "overloaded".into(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["details"], "overloaded");
    }

    #[tokio::test]
    async fn test_malformed_json_is_server_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let (status, body) = body_json(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal error");
        assert!(body["details"].as_str().unwrap().len() > 0);
    }
}
