//! Tree object
//!
//! A tree is a snapshot: an ordered list of entries naming blobs (or other trees).
//! Index entries are already path-qualified, so the tree written from the index is
//! flat: a single tree whose entry names are full repository-relative paths.
//!
//! ## Format
//!
//! On disk: `tree <size>\0{"entries":[{"mode":..,"type":..,"name":..,"id":..},..]}`
//!
//! The body is also the hash input, so entries are kept sorted by name and the
//! JSON field order is fixed by the struct declaration.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GotError;
use bytes::Bytes;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(deny_unknown_fields)]
pub struct TreeEntry {
    pub mode: EntryMode,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub name: String,
    pub id: ObjectId,
}

impl From<&IndexEntry> for TreeEntry {
    fn from(entry: &IndexEntry) -> Self {
        TreeEntry::new(
            entry.mode,
            entry.object_type,
            entry.name.clone(),
            entry.id.clone(),
        )
    }
}

/// Snapshot of staged content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from an arbitrary list of entries, sorting them by name.
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.dedup_by(|a, b| a.name == b.name);

        Tree { entries }
    }

    /// Flatten index entries into a tree
    ///
    /// The index enumerates its entries sorted by path, which is also the
    /// canonical tree order.
    pub fn build<'e>(entries: impl IntoIterator<Item = &'e IndexEntry>) -> Self {
        Self::new(entries.into_iter().map(TreeEntry::from).collect())
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&TreeEntry> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn pack(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

impl Unpackable for Tree {
    fn unpack(reader: impl BufRead) -> anyhow::Result<Self> {
        let tree: Tree = serde_json::from_reader(reader)
            .map_err(|e| GotError::corrupt("tree", e.to_string()))?;

        if !tree.entries.is_sorted_by(|a, b| a.name < b.name) {
            return Err(GotError::corrupt("tree", "entries are not sorted by name").into());
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode, entry.object_type, entry.id, entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        Ok(ObjectId::from_content(self.pack()?))
    }
}
