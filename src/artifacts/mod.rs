//! Value types and pure algorithms
//!
//! - `branch`: branch names, HEAD states and revision parsing
//! - `diff`: line diffing and hunk extraction
//! - `index`: index entries and file modes
//! - `log`: commit history traversal
//! - `objects`: stored object types (blob, tree, commit) and their IDs
//! - `status`: HEAD/index/working-tree reconciliation

pub mod branch;
pub mod diff;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
