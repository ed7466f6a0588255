//! Key-value storage subsystem.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → RecordKey (typed record name)
//!     → KvStore::get / KvStore::put (string values)
//!     → memory.rs (DashMap) | file.rs (one file per key)
//! ```
//!
//! # Design Decisions
//! - Values are opaque strings; JSON interpretation belongs to the handlers
//! - No transactions and no compare-and-swap: last write wins
//! - Backends are trait objects so tests can swap in the memory store

pub mod file;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Every record the service persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    SpaSelections,
    Comments,
    Schedule,
    Changelog,
    Proposals,
    Notes,
}

impl RecordKey {
    pub const ALL: [RecordKey; 6] = [
        RecordKey::SpaSelections,
        RecordKey::Comments,
        RecordKey::Schedule,
        RecordKey::Changelog,
        RecordKey::Proposals,
        RecordKey::Notes,
    ];

    /// Identifier used in the underlying store.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKey::SpaSelections => "spa-selections",
            RecordKey::Comments => "schedule-comments",
            RecordKey::Schedule => "schedule-html",
            RecordKey::Changelog => "schedule-changelog",
            RecordKey::Proposals => "feedback-proposals",
            RecordKey::Notes => "feedback-notes",
        }
    }

    /// Body returned by GET before the record has ever been written.
    pub fn default_body(self) -> &'static str {
        match self {
            RecordKey::SpaSelections => "{}",
            RecordKey::Comments => r#"{"text":""}"#,
            RecordKey::Schedule => r#"{"html":""}"#,
            RecordKey::Changelog => r#"{"entries":[]}"#,
            RecordKey::Proposals | RecordKey::Notes => "[]",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// A flat string-to-string store.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value for `key`, `None` if it was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value for `key`.
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_record_keys_are_distinct() {
        let keys: HashSet<_> = RecordKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), RecordKey::ALL.len());
    }

    #[test]
    fn test_default_bodies_are_json() {
        for key in RecordKey::ALL {
            let parsed: serde_json::Value = serde_json::from_str(key.default_body()).unwrap();
            assert!(parsed.is_object() || parsed.is_array(), "{key}");
        }
    }
}
