//! Object model
//!
//! All content is stored as immutable objects identified by SHA-1 hashes:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: flat, name-ordered list of staged entries
//! - **Commit**: tree + optional parent + author + message
//!
//! Every stored object shares the envelope `<type> <size>\0<body>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
