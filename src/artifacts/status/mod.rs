//! Working tree status
//!
//! Reconciles HEAD's tree, the index and the working tree.
//!
//! ## Components
//!
//! - `file_change`: change kinds and their rendering
//! - `inspector`: the two classification passes
//! - `status_tree`: hierarchical result with untracked-directory collapsing
//! - `worktree_file`: hashed working-tree files fed to the inspector

pub mod file_change;
pub mod inspector;
pub mod status_tree;
pub mod worktree_file;
