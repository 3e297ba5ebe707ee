//! Operations on a [`Repository`](crate::Repository)
//!
//! - `plumbing`: direct object and index manipulation (hash-object, write-tree, ...)
//! - `porcelain`: the everyday workflow (add, commit, status, log, ...)
//!
//! Each command is an `impl Repository` block in its own file.

pub mod plumbing;
pub mod porcelain;
