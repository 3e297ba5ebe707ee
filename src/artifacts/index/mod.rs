//! Index file format
//!
//! The index (staging area) maps repository-relative paths to the objects that
//! make up the next commit.
//!
//! ## File Format
//!
//! A single JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "entries": { "<path>": { "mode": "100644", "type": "blob", "id": "<sha>", "name": "<path>" } },
//!   "checksum": "<sha>"
//! }
//! ```
//!
//! The checksum is the SHA-1 of every entry's display line, concatenated in path order.

pub mod entry_mode;
pub mod index_entry;

/// Index file format version
pub const VERSION: u32 = 1;
