//! Hierarchical status
//!
//! Paths are split into segments; every directory remembers whether anything
//! below it is tracked. A directory with nothing tracked below it is reported
//! once, as `dir/`, instead of file by file.

use crate::artifacts::status::file_change::{ChangeType, Changes};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusNode {
    File {
        changes: Changes,
        tracked: bool,
    },
    Dir {
        tracked: bool,
        children: BTreeMap<String, StatusNode>,
    },
}

/// Rebuilt on every status run; never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTree {
    root: BTreeMap<String, StatusNode>,
}

/// Flattened view of a [`StatusTree`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub changed: BTreeMap<String, Changes>,
    pub untracked: BTreeSet<String>,
}

impl StatusTree {
    /// Record a file, merging with whatever was already recorded for it
    pub fn add_file(&mut self, path: &str, changes: Changes, tracked: bool) {
        let mut segments = path.split('/').collect::<Vec<_>>();
        let Some(file_name) = segments.pop() else {
            return;
        };

        let mut level = &mut self.root;
        for segment in segments {
            let node = level
                .entry(format!("{segment}/"))
                .or_insert_with(|| StatusNode::Dir {
                    tracked: false,
                    children: BTreeMap::new(),
                });

            let StatusNode::Dir {
                tracked: dir_tracked,
                children,
            } = node
            else {
                return;
            };
            *dir_tracked |= tracked;
            level = children;
        }

        match level.get_mut(file_name) {
            Some(StatusNode::File {
                changes: existing,
                tracked: file_tracked,
            }) => {
                existing.merge(changes);
                *file_tracked |= tracked;
            }
            _ => {
                level.insert(file_name.to_string(), StatusNode::File { changes, tracked });
            }
        }
    }

    pub fn changes(&self, path: &str) -> Option<&Changes> {
        let mut segments = path.split('/').collect::<Vec<_>>();
        let file_name = segments.pop()?;

        let mut level = &self.root;
        for segment in segments {
            match level.get(&format!("{segment}/"))? {
                StatusNode::Dir { children, .. } => level = children,
                StatusNode::File { .. } => return None,
            }
        }

        match level.get(file_name)? {
            StatusNode::File { changes, .. } => Some(changes),
            StatusNode::Dir { .. } => None,
        }
    }

    /// Tracked files with at least one change, and untracked files or
    /// collapsed untracked directories
    pub fn report(&self) -> StatusReport {
        let mut report = StatusReport::default();
        Self::collect(&self.root, "", &mut report);

        report
    }

    fn collect(level: &BTreeMap<String, StatusNode>, prefix: &str, report: &mut StatusReport) {
        for (name, node) in level {
            let path = format!("{prefix}{name}");

            match node {
                StatusNode::File { changes, tracked } if *tracked => {
                    if !changes.is_empty() {
                        report.changed.insert(path, *changes);
                    }
                }
                StatusNode::File { .. } => {
                    report.untracked.insert(path);
                }
                StatusNode::Dir { tracked, children } if *tracked => {
                    Self::collect(children, &path, report);
                }
                StatusNode::Dir { .. } => {
                    report.untracked.insert(path);
                }
            }
        }
    }
}

impl StatusReport {
    pub fn staged(&self) -> impl Iterator<Item = (&String, ChangeType)> {
        self.changed
            .iter()
            .filter_map(|(path, changes)| changes.head.map(|change| (path, change)))
    }

    pub fn unstaged(&self) -> impl Iterator<Item = (&String, ChangeType)> {
        self.changed
            .iter()
            .filter_map(|(path, changes)| changes.worktree.map(|change| (path, change)))
    }

    /// No staged or unstaged change; untracked files do not count
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty()
    }
}
