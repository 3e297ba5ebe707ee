//! got: a small content-addressed version-control engine
//!
//! The crate is split the same way the on-disk repository is:
//!
//! - `areas`: components owning a part of the `.got` directory (objects, index, refs)
//!   plus the working tree and the repository handle tying them together
//! - `artifacts`: value types and pure algorithms (objects, diff, status, log)
//! - `commands`: plumbing and porcelain operations implemented on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::Repository;
pub use errors::{ErrorKind, GotError};

/// Name of the repository metadata directory
pub const GOT_DIR: &str = ".got";

/// Branch created by the first commit of a repository
pub const DEFAULT_BRANCH: &str = "master";
