//! Plumbing commands (low-level operations)
//!
//! Direct access to objects and the index, used by scripts and as building
//! blocks for the porcelain commands.
//!
//! ## Commands
//!
//! - `hash-object`: compute a file's blob ID and optionally store it
//! - `cat-file`: print any stored object
//! - `write-tree`: store the index as a tree
//! - `read-tree`: merge a stored tree into the index
//! - `commit-tree`: store a commit for a given tree
//! - `update-index`: restage tracked files, optionally adding new ones

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod read_tree;
pub mod update_index;
pub mod write_tree;
