//! Trip Planner API Library
//!
//! A small JSON document service for a shared trip plan: spa selections,
//! schedule HTML, comments, proposals, notes and a changelog, plus an
//! AI-assisted schedule editor.

pub mod ai;
pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod records;
pub mod routing;
pub mod store;

pub use config::AppConfig;
pub use http::{build_router, AppState, HttpServer};
pub use lifecycle::Shutdown;
