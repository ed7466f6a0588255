//! Path pattern matching.
//!
//! # Responsibilities
//! - Match exact paths
//! - Match a fixed prefix followed by exactly one parameter segment
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - A trailing slash is significant (`/api/spa/` is not `/api/spa`)
//! - No regex to guarantee O(n) matching

/// A compiled path condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// The whole path must equal this string.
    Exact(&'static str),
    /// `prefix` followed by one non-empty segment without '/'.
    Param { prefix: &'static str },
}

impl PathPattern {
    /// Returns `Some(param)` on a match; `param` is empty for exact patterns.
    pub fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            PathPattern::Exact(expected) => (path == *expected).then_some(""),
            PathPattern::Param { prefix } => {
                let segment = path.strip_prefix(prefix)?;
                (!segment.is_empty() && !segment.contains('/')).then_some(segment)
            }
        }
    }
}
