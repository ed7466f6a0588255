//! Proposal and note lists.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Maximum entries kept per list.
pub const MAX_ENTRIES: usize = 100;

/// One proposal or note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub text: String,
    /// ISO-8601 creation time.
    pub date: String,
    /// Millisecond timestamp, doubles as the delete key.
    pub id: i64,
}

/// Newest-first list of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList(Vec<Entry>);

impl EntryList {
    pub fn entries(&self) -> &[Entry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Prepend an entry created at `now` and drop the oldest beyond the cap.
    ///
    /// `text` must already be trimmed and non-empty. The id is the creation
    /// time in milliseconds, bumped past the current newest id if the clock
    /// has not moved on.
    pub fn push_front(&mut self, text: String, now: DateTime<Utc>) -> &Entry {
        let mut id = now.timestamp_millis();
        if let Some(newest) = self.0.first() {
            id = id.max(newest.id + 1);
        }

        self.0.insert(
            0,
            Entry {
                text,
                date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
                id,
            },
        );
        self.0.truncate(MAX_ENTRIES);
        &self.0[0]
    }

    /// Remove every entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.0.len();
        self.0.retain(|e| e.id != id);
        self.0.len() != before
    }
}
