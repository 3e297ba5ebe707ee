//! Index entry representation
//!
//! Each entry in the index represents a staged file with:
//! - Repository-relative path (always `/`-separated)
//! - Content hash (object ID)
//! - Mode and object type
//!
//! Entries order by path only; that order is the canonical tree order.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::TreeEntry;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Staged reference to an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(deny_unknown_fields)]
pub struct IndexEntry {
    pub mode: EntryMode,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub id: ObjectId,
    /// Path relative to the repository root
    pub name: String,
}

impl IndexEntry {
    /// Stage a blob
    pub fn blob(name: impl Into<String>, id: ObjectId, mode: EntryMode) -> Self {
        IndexEntry::new(mode, ObjectType::Blob, id, name.into())
    }

    pub fn basename(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Every ancestor directory of the entry, outermost first
    ///
    /// `a/b/c.txt` yields `["a", "a/b"]`.
    pub fn parent_dirs(&self) -> Vec<&str> {
        self.name
            .match_indices('/')
            .map(|(idx, _)| &self.name[..idx])
            .collect()
    }
}

impl From<&TreeEntry> for IndexEntry {
    fn from(entry: &TreeEntry) -> Self {
        IndexEntry::new(
            entry.mode,
            entry.object_type,
            entry.id.clone(),
            entry.name.clone(),
        )
    }
}

impl PartialOrd for IndexEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

/// The line contributing to the index checksum
impl std::fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<10} {} {:<46} {}",
            self.mode, self.object_type, self.id, self.name
        )
    }
}
