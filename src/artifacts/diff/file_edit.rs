use crate::artifacts::diff::diff_algorithm::diff_bytes;

/// How a file changed between two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileEditKind {
    Created,
    Deleted,
    Modified,
    Unmodified,
}

/// Classify the change from `a` to `b`, where `None` means the file is absent
///
/// Present on both sides, the buffers are compared line by line; the file is
/// modified as soon as one line was inserted or deleted.
pub fn diff_files(a: Option<&[u8]>, b: Option<&[u8]>) -> FileEditKind {
    match (a, b) {
        (None, None) => FileEditKind::Unmodified,
        (None, Some(_)) => FileEditKind::Created,
        (Some(_), None) => FileEditKind::Deleted,
        (Some(a), Some(b)) => {
            if diff_bytes(a, b).iter().any(|edit| edit.is_change()) {
                FileEditKind::Modified
            } else {
                FileEditKind::Unmodified
            }
        }
    }
}
