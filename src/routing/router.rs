//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the compiled route table
//! - Look up the action for a (method, path) pair
//! - Return the action or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over a table of about a dozen entries
//! - Explicit NoMatch rather than silent default

use axum::http::Method;

use crate::config::RoutesConfig;
use crate::routing::matcher::PathPattern;
use crate::store::RecordKey;

/// A list-valued record addressed by the proposals/notes routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Proposals,
    Notes,
}

impl ListKind {
    pub fn record(self) -> RecordKey {
        match self {
            ListKind::Proposals => RecordKey::Proposals,
            ListKind::Notes => RecordKey::Notes,
        }
    }
}

/// What a matched route does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Return the stored blob or its default.
    ReadRecord(RecordKey),
    /// Store the raw body verbatim.
    WriteRecord(RecordKey),
    /// Transform the schedule through the completion service.
    AiEdit,
    ListEntries(ListKind),
    AddEntry(ListKind),
    /// Remove the entry whose id is the trailing path segment.
    DeleteEntry(ListKind),
}

impl Action {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Action::ReadRecord(RecordKey::SpaSelections) => "spa.get",
            Action::WriteRecord(RecordKey::SpaSelections) => "spa.put",
            Action::ReadRecord(RecordKey::Comments) => "comments.get",
            Action::WriteRecord(RecordKey::Comments) => "comments.put",
            Action::ReadRecord(RecordKey::Schedule) => "schedule.get",
            Action::ReadRecord(RecordKey::Changelog) => "changelog.get",
            Action::ReadRecord(_) => "record.get",
            Action::WriteRecord(_) => "record.put",
            Action::AiEdit => "ai_edit",
            Action::ListEntries(ListKind::Proposals) => "proposals.list",
            Action::AddEntry(ListKind::Proposals) => "proposals.add",
            Action::DeleteEntry(ListKind::Proposals) => "proposals.delete",
            Action::ListEntries(ListKind::Notes) => "notes.list",
            Action::AddEntry(ListKind::Notes) => "notes.add",
            Action::DeleteEntry(ListKind::Notes) => "notes.delete",
        }
    }
}

/// A single routing rule.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    pub action: Action,
}

impl Route {
    fn new(method: Method, pattern: PathPattern, action: Action) -> Self {
        Self {
            method,
            pattern,
            action,
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub action: Action,
    /// Trailing path parameter, empty for exact routes.
    pub param: &'a str,
}

/// The compiled route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Compile the route table for the given route options.
    pub fn from_config(config: &RoutesConfig) -> Self {
        use Action::*;
        use PathPattern::{Exact, Param};

        let mut routes = vec![
            Route::new(Method::GET, Exact("/api/spa"), ReadRecord(RecordKey::SpaSelections)),
            Route::new(Method::PUT, Exact("/api/spa"), WriteRecord(RecordKey::SpaSelections)),
        ];

        if config.comments_enabled {
            routes.push(Route::new(
                Method::GET,
                Exact("/api/comments"),
                ReadRecord(RecordKey::Comments),
            ));
            routes.push(Route::new(
                Method::PUT,
                Exact("/api/comments"),
                WriteRecord(RecordKey::Comments),
            ));
        }

        routes.extend([
            Route::new(Method::GET, Exact("/api/schedule"), ReadRecord(RecordKey::Schedule)),
            Route::new(Method::GET, Exact("/api/changelog"), ReadRecord(RecordKey::Changelog)),
            Route::new(Method::POST, Exact("/api/ai-edit"), AiEdit),
        ]);

        for (base, item_prefix, kind) in [
            ("/api/proposals", "/api/proposals/", ListKind::Proposals),
            ("/api/notes", "/api/notes/", ListKind::Notes),
        ] {
            routes.push(Route::new(Method::GET, Exact(base), ListEntries(kind)));
            routes.push(Route::new(Method::POST, Exact(base), AddEntry(kind)));
            routes.push(Route::new(
                Method::DELETE,
                Param {
                    prefix: item_prefix,
                },
                DeleteEntry(kind),
            ));
        }

        tracing::debug!(routes = routes.len(), "Route table compiled");
        Self { routes }
    }

    /// Find the first route matching `method` and `path`.
    pub fn match_request<'a>(&self, method: &Method, path: &'a str) -> Option<RouteMatch<'a>> {
        self.routes
            .iter()
            .filter(|r| r.method == *method)
            .find_map(|r| {
                r.pattern.matches(path).map(|param| RouteMatch {
                    action: r.action,
                    param,
                })
            })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::from_config(&RoutesConfig::default())
    }

    #[test]
    fn test_every_route_is_reachable() {
        let router = router();
        for route in router.routes() {
            let path = match route.pattern {
                PathPattern::Exact(p) => p.to_string(),
                PathPattern::Param { prefix } => format!("{prefix}42"),
            };
            let matched = router.match_request(&route.method, &path).unwrap();
            assert_eq!(matched.action, route.action, "{} {}", route.method, path);
        }
        assert_eq!(router.routes().len(), 13);
    }

    #[test]
    fn test_delete_captures_id() {
        let matched = router()
            .match_request(&Method::DELETE, "/api/notes/12345")
            .unwrap();
        assert_eq!(matched.action, Action::DeleteEntry(ListKind::Notes));
        assert_eq!(matched.param, "12345");
    }

    #[test]
    fn test_method_mismatch_is_no_match() {
        let router = router();
        assert!(router.match_request(&Method::POST, "/api/spa").is_none());
        assert!(router.match_request(&Method::DELETE, "/api/proposals").is_none());
        assert!(router.match_request(&Method::GET, "/api/unknown").is_none());
    }

    #[test]
    fn test_comments_can_be_disabled() {
        let router = Router::from_config(&RoutesConfig {
            comments_enabled: false,
        });
        assert!(router.match_request(&Method::GET, "/api/comments").is_none());
        assert!(router.match_request(&Method::GET, "/api/spa").is_some());
        assert_eq!(router.routes().len(), 11);
    }

    #[test]
    fn test_labels_are_unique_per_route() {
        let router = router();
        let labels: std::collections::HashSet<_> =
            router.routes().iter().map(|r| r.action.label()).collect();
        assert_eq!(labels.len(), router.routes().len());
    }
}
