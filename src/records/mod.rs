//! Typed views over the JSON records that have structure.
//!
//! Spa selections and comments are opaque passthrough blobs and have no type
//! here. Lists and the changelog are decoded, mutated and re-encoded.

pub mod changelog;
pub mod entries;

use serde::{Deserialize, Serialize};

pub use changelog::{Changelog, ChangelogEntry, MAX_CHANGELOG_ENTRIES};
pub use entries::{Entry, EntryList, MAX_ENTRIES};

/// The stored schedule override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub html: String,
}
