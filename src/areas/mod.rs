//! Core repository components
//!
//! Each component owns a disjoint part of the repository:
//!
//! - `database`: object store under `.got/objects`
//! - `index`: staging area in `.got/index`
//! - `refs`: `.got/HEAD` and branches under `.got/refs/heads`
//! - `workspace`: the working tree
//! - `repository`: the handle tying them together

use anyhow::Context;
use std::io::Write;
use std::path::Path;

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;

/// Replace `path` with `content` through a temp file in the same directory
pub(crate) fn write_atomically(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("invalid path {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("unable to create directory {}", dir.display()))?;

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("unable to create temp file in {}", dir.display()))?;
    file.write_all(content)
        .with_context(|| format!("unable to write temp file for {}", path.display()))?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("unable to move temp file to {}", path.display()))?;

    Ok(())
}
