use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;

/// A file found by the working-tree walk, already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeFile {
    pub path: String,
    pub mode: EntryMode,
    pub id: ObjectId,
    pub content: Bytes,
}

impl WorktreeFile {
    pub fn new(path: impl Into<String>, mode: EntryMode, content: impl Into<Bytes>) -> Self {
        let content = content.into();

        WorktreeFile {
            path: path.into(),
            mode,
            id: ObjectId::from_content(&content),
            content,
        }
    }
}
