//! Proposal and note list handlers.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::records::EntryList;
use crate::routing::ListKind;

#[derive(Debug, Deserialize)]
struct NewEntry {
    #[serde(default)]
    text: Option<String>,
}

async fn load(state: &AppState, kind: ListKind) -> Result<EntryList, ApiError> {
    match state.store.get(kind.record().as_str()).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(EntryList::default()),
    }
}

async fn save(state: &AppState, kind: ListKind, list: &EntryList) -> Result<(), ApiError> {
    let raw = serde_json::to_string(list)?;
    state.store.put(kind.record().as_str(), raw).await?;
    Ok(())
}

pub async fn list(state: &AppState, kind: ListKind) -> Result<Response, ApiError> {
    match state.store.get(kind.record().as_str()).await? {
        Some(raw) => Ok(crate::http::response::raw_json(raw)),
        None => Ok(Json(EntryList::default()).into_response()),
    }
}

/// Prepend a trimmed entry and return the updated list.
pub async fn add(state: &AppState, kind: ListKind, body: &[u8]) -> Result<Response, ApiError> {
    let request: NewEntry = serde_json::from_slice(body)?;
    let text = request.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::bad_request("Text is required"));
    }

    let mut list = load(state, kind).await?;
    let id = list.push_front(text.to_string(), Utc::now()).id;
    save(state, kind, &list).await?;

    tracing::info!(list = %kind.record(), id, total = list.len(), "Entry added");
    Ok(Json(list).into_response())
}

/// Remove the entry with the id in `param` and return the updated list.
pub async fn delete(state: &AppState, kind: ListKind, param: &str) -> Result<Response, ApiError> {
    let id: i64 = param
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid id '{param}'")))?;

    let mut list = load(state, kind).await?;
    let removed = list.remove(id);
    save(state, kind, &list).await?;

    tracing::info!(list = %kind.record(), id, removed, "Entry delete processed");
    Ok(Json(list).into_response())
}
