//! Opaque record reads and writes (spa selections, comments, schedule, changelog).

use axum::{
    body::Bytes,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::error::ApiError;
use crate::http::response::raw_json;
use crate::http::server::AppState;
use crate::store::RecordKey;

/// Return the stored blob verbatim, or the record's default.
pub async fn read(state: &AppState, key: RecordKey) -> Result<Response, ApiError> {
    let stored = state.store.get(key.as_str()).await?;
    Ok(raw_json(stored.unwrap_or_else(|| key.default_body().to_string())))
}

/// Store the request body as-is.
pub async fn write(state: &AppState, key: RecordKey, body: Bytes) -> Result<Response, ApiError> {
    let value = String::from_utf8(body.to_vec())
        .map_err(|_| ApiError::bad_request("Request body must be UTF-8"))?;
    state.store.put(key.as_str(), value).await?;
    tracing::debug!(key = %key, "Record replaced");
    Ok(Json(json!({ "ok": true })).into_response())
}
