//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate path patterns)
//!     → Return: Action + path parameter, or NoMatch
//!
//! Route Compilation (at startup):
//!     RoutesConfig
//!     → fixed table of (method, pattern, action)
//!     → optional groups (comments) added or left out
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (table order)

pub mod matcher;
pub mod router;

pub use matcher::PathPattern;
pub use router::{Action, ListKind, Route, RouteMatch, Router};
