//! Three-way status classification
//!
//! Two independent passes feed one [`StatusTree`]:
//!
//! 1. HEAD against the index gives the staged side of every file
//! 2. the index against the working tree gives the unstaged side, and every
//!    working file unknown to the index is untracked
//!
//! Nothing here touches the filesystem: the working tree arrives as an already
//! collected list of hashed files, and blob contents come through [`BlobReader`].

use crate::artifacts::diff::file_edit::diff_files;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::artifacts::status::file_change::{ChangeType, Changes};
use crate::artifacts::status::status_tree::StatusTree;
use crate::artifacts::status::worktree_file::WorktreeFile;
use crate::errors::GotError;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Source of stored blob contents
pub trait BlobReader {
    fn read_blob(&self, id: &ObjectId) -> anyhow::Result<Bytes>;
}

#[derive(new)]
pub struct Inspector<'r, B: BlobReader> {
    blobs: &'r B,
}

impl<B: BlobReader> Inspector<'_, B> {
    /// Classify every known path
    ///
    /// `head` is `None` while HEAD is empty: every index entry is then staged as
    /// created and nothing can be deleted from HEAD.
    pub fn status(
        &self,
        head: Option<&Tree>,
        index: &[IndexEntry],
        worktree: &[WorktreeFile],
    ) -> anyhow::Result<StatusTree> {
        let mut status = StatusTree::default();

        self.check_head_against_index(head, index, &mut status)?;
        self.check_index_against_worktree(index, worktree, &mut status)?;

        Ok(status)
    }

    fn check_head_against_index(
        &self,
        head: Option<&Tree>,
        index: &[IndexEntry],
        status: &mut StatusTree,
    ) -> anyhow::Result<()> {
        let mut staged = 0;

        for entry in index {
            let head_entry = head.and_then(|tree| tree.entry(&entry.name));
            let change = self.compare_index_with_head(Some(entry), head_entry)?;
            staged += usize::from(change.is_some());

            status.add_file(
                &entry.name,
                Changes {
                    head: change,
                    worktree: None,
                },
                true,
            );
        }

        if let Some(tree) = head {
            let indexed = index
                .iter()
                .map(|entry| entry.name.as_str())
                .collect::<BTreeSet<_>>();

            for head_entry in tree.entries() {
                if !indexed.contains(head_entry.name.as_str()) {
                    staged += 1;
                    status.add_file(
                        &head_entry.name,
                        Changes {
                            head: Some(ChangeType::Deleted),
                            worktree: None,
                        },
                        true,
                    );
                }
            }
        }

        tracing::debug!(staged, "compared HEAD with the index");
        Ok(())
    }

    fn check_index_against_worktree(
        &self,
        index: &[IndexEntry],
        worktree: &[WorktreeFile],
        status: &mut StatusTree,
    ) -> anyhow::Result<()> {
        let files = worktree
            .iter()
            .map(|file| (file.path.as_str(), file))
            .collect::<BTreeMap<_, _>>();
        let mut unstaged = 0;

        for entry in index {
            let file = files.get(entry.name.as_str()).copied();
            let change = self.compare_worktree_with_index(Some(entry), file)?;
            unstaged += usize::from(change.is_some());

            status.add_file(
                &entry.name,
                Changes {
                    head: None,
                    worktree: change,
                },
                true,
            );
        }

        let indexed = index
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<BTreeSet<_>>();
        let mut untracked = 0;
        for file in worktree {
            if !indexed.contains(file.path.as_str()) {
                untracked += 1;
                status.add_file(&file.path, Changes::default(), false);
            }
        }

        tracing::debug!(unstaged, untracked, "compared the index with the working tree");
        Ok(())
    }

    /// Staged change of one path
    ///
    /// Equal IDs are unmodified without looking at content; differing IDs
    /// are confirmed with a content diff.
    pub fn compare_index_with_head(
        &self,
        index_entry: Option<&IndexEntry>,
        head_entry: Option<&TreeEntry>,
    ) -> anyhow::Result<Option<ChangeType>> {
        match (index_entry, head_entry) {
            (None, None) => Ok(None),
            (Some(_), None) => Ok(Some(ChangeType::Created)),
            (None, Some(_)) => Ok(Some(ChangeType::Deleted)),
            (Some(index_entry), Some(head_entry)) if index_entry.id == head_entry.id => Ok(None),
            (Some(index_entry), Some(head_entry)) => {
                if index_entry.object_type != ObjectType::Blob
                    || head_entry.object_type != ObjectType::Blob
                {
                    return Ok(Some(ChangeType::Modified));
                }

                let head_content = self.read(&head_entry.id, &head_entry.name)?;
                let index_content = self.read(&index_entry.id, &index_entry.name)?;

                Self::classify(&head_content, &index_content, &index_entry.name).map(Some)
            }
        }
    }

    /// Unstaged change of one path
    pub fn compare_worktree_with_index(
        &self,
        index_entry: Option<&IndexEntry>,
        file: Option<&WorktreeFile>,
    ) -> anyhow::Result<Option<ChangeType>> {
        match (index_entry, file) {
            (None, None) => Ok(None),
            (None, Some(_)) => Ok(Some(ChangeType::Created)),
            (Some(_), None) => Ok(Some(ChangeType::Deleted)),
            (Some(index_entry), Some(file)) if index_entry.id == file.id => Ok(None),
            (Some(index_entry), Some(_)) if index_entry.object_type != ObjectType::Blob => {
                Ok(Some(ChangeType::Modified))
            }
            (Some(index_entry), Some(file)) => {
                let index_content = self.read(&index_entry.id, &index_entry.name)?;

                Self::classify(&index_content, &file.content, &index_entry.name).map(Some)
            }
        }
    }

    /// Change between two contents whose IDs differ
    fn classify(a: &[u8], b: &[u8], path: &str) -> anyhow::Result<ChangeType> {
        ChangeType::from_edit(diff_files(Some(a), Some(b))).ok_or_else(|| {
            GotError::corrupt(
                "blob",
                format!("{path} has differing IDs but identical content"),
            )
            .into()
        })
    }

    fn read(&self, id: &ObjectId, path: &str) -> anyhow::Result<Bytes> {
        self.blobs
            .read_blob(id)
            .with_context(|| format!("unable to read blob {id} for {path}"))
    }
}
