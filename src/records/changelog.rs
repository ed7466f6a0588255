//! Schedule edit history.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Maximum changelog entries kept.
pub const MAX_CHANGELOG_ENTRIES: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub what: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    #[serde(default)]
    pub entries: Vec<ChangelogEntry>,
}

impl Changelog {
    /// Record `what` as the newest change, keeping at most the cap.
    pub fn record(&mut self, what: impl Into<String>, now: DateTime<Utc>) {
        self.entries.insert(
            0,
            ChangelogEntry {
                what: what.into(),
                time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        );
        self.entries.truncate(MAX_CHANGELOG_ENTRIES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_caps_at_fifty() {
        let mut log = Changelog::default();
        let now = Utc::now();
        for i in 0..60 {
            log.record(format!("edit {i}"), now);
        }
        assert_eq!(log.entries.len(), MAX_CHANGELOG_ENTRIES);
        assert_eq!(log.entries[0].what, "edit 59");
        assert_eq!(log.entries[49].what, "edit 10");
    }

    #[test]
    fn test_missing_entries_field_defaults_empty() {
        let log: Changelog = serde_json::from_str("{}").unwrap();
        assert!(log.entries.is_empty());
    }
}
