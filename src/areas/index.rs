//! Index (staging area)
//!
//! Maps repository-relative paths to the objects staged for the next commit.
//!
//! ## Index File Format
//!
//! A JSON document holding a format version, the entries keyed by path and a
//! checksum: the SHA-1 of every entry's display line concatenated in path
//! order. A mismatch between the stored and the recomputed checksum means the
//! file is corrupt.
//!
//! Every mutation recomputes the checksum and persists the whole file.

use crate::areas::write_atomically;
use crate::artifacts::index::VERSION;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::GotError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// On-disk shape of the index
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndexFile {
    version: u32,
    entries: BTreeMap<String, IndexEntry>,
    checksum: ObjectId,
}

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.got/index`)
    path: Box<Path>,
    /// Staged files mapped by path
    entries: BTreeMap<String, IndexEntry>,
    /// Directory paths mapped to the staged files below them
    children: BTreeMap<String, BTreeSet<String>>,
    checksum: ObjectId,
}

impl Index {
    /// Create an empty, not yet persisted index
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            children: BTreeMap::new(),
            checksum: ObjectId::from_content(""),
        }
    }

    /// Read the index from disk
    ///
    /// A missing or empty file is an empty index.
    pub fn load(path: Box<Path>) -> anyhow::Result<Self> {
        let mut index = Index::new(path);

        let content = match std::fs::read(&index.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(index),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("unable to read index {}", index.path.display())));
            }
        };
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(index);
        }

        let file: IndexFile = serde_json::from_slice(&content)
            .map_err(|e| GotError::corrupt("index", e.to_string()))?;
        if file.version != VERSION {
            return Err(GotError::corrupt(
                "index",
                format!("unsupported version {}", file.version),
            )
            .into());
        }

        for (path, entry) in file.entries {
            if path != entry.name {
                return Err(GotError::corrupt(
                    "index",
                    format!("entry '{}' is stored under '{path}'", entry.name),
                )
                .into());
            }
            index.store_entry(entry);
        }

        index.checksum = index.compute_checksum();
        if index.checksum != file.checksum {
            return Err(GotError::corrupt(
                "index",
                format!(
                    "checksum mismatch: stored {} but computed {}",
                    file.checksum, index.checksum
                ),
            )
            .into());
        }

        tracing::debug!(entries = index.entries.len(), "loaded index");
        Ok(index)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn checksum(&self) -> &ObjectId {
        &self.checksum
    }

    /// Stage `path` as the blob `id` with the given mode
    pub fn add_file(&mut self, path: &str, id: ObjectId, mode: EntryMode) -> anyhow::Result<()> {
        let entry = IndexEntry::blob(path, id, mode);
        self.discard_conflicts(&entry);
        self.store_entry(entry);

        self.write_updates()
            .with_context(|| format!("unable to stage {path}"))
    }

    /// Unstage `path`, or every staged file below it when it is a directory
    pub fn remove_file(&mut self, path: &str) -> anyhow::Result<()> {
        if !self.has_entry_for(path) {
            return Err(GotError::not_found("index entry", path).into());
        }

        self.remove_entry(path);
        self.remove_children(path);

        self.write_updates()
            .with_context(|| format!("unable to unstage {path}"))
    }

    /// Merge every entry of `tree` into the index as stored
    pub fn add_tree_contents(&mut self, tree: &Tree) -> anyhow::Result<()> {
        for tree_entry in tree.entries() {
            let entry = IndexEntry::from(tree_entry);
            self.discard_conflicts(&entry);
            self.store_entry(entry);
        }

        self.write_updates()
            .context("unable to read tree into the index")
    }

    /// Replace all entries with the contents of `tree`
    pub fn reset_to_tree(&mut self, tree: &Tree) -> anyhow::Result<()> {
        self.entries.clear();
        self.children.clear();

        self.add_tree_contents(tree)
    }

    /// Whether `path` is a staged file or a directory containing one
    pub fn has_entry_for(&self, path: &str) -> bool {
        self.entries.contains_key(path) || self.children.contains_key(path)
    }

    pub fn entry(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn get_entry_id(&self, path: &str) -> anyhow::Result<&ObjectId> {
        self.entries
            .get(path)
            .map(|entry| &entry.id)
            .ok_or_else(|| GotError::not_found("index entry", path).into())
    }

    /// Entries ordered by path
    pub fn sorted_entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    /// Staged paths equal to `path` or below it
    pub fn entries_under_path(&self, path: &str) -> Vec<String> {
        if path.is_empty() || path == "." {
            return self.entries.keys().cloned().collect();
        }

        match self.children.get(path) {
            Some(children) => children.iter().cloned().collect(),
            None if self.entries.contains_key(path) => vec![path.to_string()],
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn compute_checksum(&self) -> ObjectId {
        let lines = self
            .sorted_entries()
            .map(ToString::to_string)
            .collect::<String>();

        ObjectId::from_content(lines)
    }

    fn write_updates(&mut self) -> anyhow::Result<()> {
        self.checksum = self.compute_checksum();

        let file = IndexFile {
            version: VERSION,
            entries: self.entries.clone(),
            checksum: self.checksum.clone(),
        };
        let content = serde_json::to_vec_pretty(&file)?;
        write_atomically(&self.path, &content)?;

        tracing::debug!(entries = self.entries.len(), checksum = %self.checksum, "persisted index");
        Ok(())
    }

    /// A file replaces any staged directory of the same name and vice versa
    fn discard_conflicts(&mut self, entry: &IndexEntry) {
        for parent in entry.parent_dirs() {
            self.remove_entry(parent);
        }
        self.remove_children(&entry.name);
    }

    fn store_entry(&mut self, entry: IndexEntry) {
        for parent in entry.parent_dirs() {
            self.children
                .entry(parent.to_string())
                .or_default()
                .insert(entry.name.clone());
        }

        self.entries.insert(entry.name.clone(), entry);
    }

    fn remove_children(&mut self, path: &str) {
        if let Some(children) = self.children.remove(path) {
            for child in children {
                self.remove_entry(&child);
            }
        }
    }

    fn remove_entry(&mut self, path: &str) {
        let Some(entry) = self.entries.remove(path) else {
            return;
        };

        for parent in entry.parent_dirs() {
            if let Some(children) = self.children.get_mut(parent) {
                children.remove(path);
                if children.is_empty() {
                    self.children.remove(parent);
                }
            }
        }
    }
}
