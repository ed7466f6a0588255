//! Response construction.
//!
//! # Responsibilities
//! - Permissive cross-origin header set applied to every response
//! - Raw JSON passthrough for stored blobs
//!
//! # Design Decisions
//! - CORS headers are set by an outer layer so error, timeout and
//!   preflight responses carry them too
//! - Stored blobs are returned byte-for-byte, never re-serialized

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Header set added to every response.
pub const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        "GET, PUT, POST, DELETE, OPTIONS",
    ),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (header::CONTENT_TYPE, "application/json"),
];

/// Return `body` as-is with a JSON content type.
pub fn raw_json(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        Body::from(body),
    )
        .into_response()
}

/// Empty 200 answer to a preflight request.
pub fn preflight() -> Response {
    StatusCode::OK.into_response()
}
