//! Line diffing
//!
//! - `diff_algorithm`: longest-common-subsequence line diff over byte buffers
//! - `hunk`: grouping of edits into context-bounded hunks
//! - `file_edit`: file-level classification (created, deleted, modified)
//! - `diff_target`: one side of a rendered file diff

pub mod diff_algorithm;
pub mod diff_target;
pub mod file_edit;
pub mod hunk;

/// Unchanged lines kept around each change when building hunks
pub const HUNK_CONTEXT: usize = 3;
