//! Commit history traversal
//!
//! - `rev_list`: walks parent links from a starting commit
//!
//! History is linear: every commit has at most one parent, so the walk is a
//! plain linked-list traversal that stops at the root commit or once the
//! requested number of commits has been produced.

pub mod rev_list;
