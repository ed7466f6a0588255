//! Schedule edits through the completion service.
//!
//! The flow is strictly sequential: validate, complete, clean, persist the
//! schedule, append to the changelog, then hand the email off to a detached
//! task. Nothing is written unless the completion succeeded.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::ai::prompt::{build_edit_prompt, clean_completion};
use crate::ai::{CompletionRequest, Message};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::notify::{spawn_notification, EmailMessage};
use crate::records::{Changelog, Schedule};
use crate::store::RecordKey;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiEditRequest {
    #[serde(default)]
    instruction: Option<String>,
    #[serde(default)]
    current_html: Option<String>,
}

pub async fn ai_edit(state: &AppState, body: &[u8]) -> Result<Response, ApiError> {
    let request: AiEditRequest = serde_json::from_slice(body)?;
    let (instruction, current_html) = match (request.instruction, request.current_html) {
        (Some(i), Some(h)) if !i.trim().is_empty() && !h.trim().is_empty() => (i, h),
        _ => {
            return Err(ApiError::bad_request(
                "Both instruction and currentHtml are required",
            ))
        }
    };

    let completion = CompletionRequest {
        model: state.ai.model.clone(),
        max_tokens: state.ai.max_tokens,
        messages: vec![Message::user(build_edit_prompt(&instruction, &current_html))],
    };

    let response = state.completion.complete(completion).await.map_err(|e| {
        tracing::warn!(error = %e, "Completion request failed");
        ApiError::Upstream {
            details: e.details(),
        }
    })?;
    let raw = response.first_text().ok_or_else(|| ApiError::Upstream {
        details: "completion contained no text".to_string(),
    })?;
    let html = clean_completion(raw);

    let schedule = Schedule { html: html.clone() };
    state
        .store
        .put(RecordKey::Schedule.as_str(), serde_json::to_string(&schedule)?)
        .await?;

    let now = Utc::now();
    let mut changelog: Changelog = match state.store.get(RecordKey::Changelog.as_str()).await? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => Changelog::default(),
    };
    changelog.record(instruction.trim(), now);
    state
        .store
        .put(RecordKey::Changelog.as_str(), serde_json::to_string(&changelog)?)
        .await?;

    tracing::info!(
        html_len = html.len(),
        changelog_entries = changelog.entries.len(),
        "Schedule updated"
    );

    if let Some(notifier) = &state.notifier {
        let message = EmailMessage::schedule_edited(
            &state.email,
            instruction.trim(),
            &now.to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        spawn_notification(notifier.clone(), message);
    }

    Ok(Json(json!({
        "ok": true,
        "html": html,
        "instruction": instruction,
    }))
    .into_response())
}
