//! Porcelain commands (user-facing operations)
//!
//! They compose the plumbing commands and the repository components into the
//! everyday workflow.
//!
//! ## Commands
//!
//! - `init`: create a new repository
//! - `add`: stage files
//! - `restore`: unstage files or discard working-tree changes
//! - `commit`: record the staged snapshot
//! - `status`: show staged, unstaged and untracked files
//! - `diff`: show line changes, staged or not
//! - `log`: show commit history
//! - `branch`: create, list or delete branches
//! - `checkout`: switch branches or detach HEAD at a commit

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod restore;
pub mod status;
