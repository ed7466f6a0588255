//! Route action handlers.
//!
//! Each handler performs the store/upstream work for one `Action` and returns
//! either a response or an `ApiError`; status mapping and CORS headers are
//! applied by the server around them.

pub mod ai_edit;
pub mod lists;
pub mod records;

use axum::body::Bytes;
use axum::response::Response;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::routing::{Action, RouteMatch};

/// Run the handler for a matched route.
pub async fn dispatch(
    state: &AppState,
    route: &RouteMatch<'_>,
    body: Bytes,
) -> Result<Response, ApiError> {
    match route.action {
        Action::ReadRecord(key) => records::read(state, key).await,
        Action::WriteRecord(key) => records::write(state, key, body).await,
        Action::AiEdit => ai_edit::ai_edit(state, &body).await,
        Action::ListEntries(kind) => lists::list(state, kind).await,
        Action::AddEntry(kind) => lists::add(state, kind, &body).await,
        Action::DeleteEntry(kind) => lists::delete(state, kind, route.param).await,
    }
}
