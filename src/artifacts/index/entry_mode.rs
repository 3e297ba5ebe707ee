use crate::errors::GotError;
use is_executable::IsExecutable;
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::path::Path;

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

/// POSIX mode bits recorded for an index or tree entry
#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EntryMode {
    File(FileMode),
    Symlink,
    Directory,
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode::File(FileMode::Regular)
    }
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Symlink => "120000",
            EntryMode::Directory => "40000",
        }
    }

    /// Permission bits to apply when materialising the entry in the working tree
    pub fn permissions(&self) -> u32 {
        match self {
            EntryMode::File(FileMode::Executable) => 0o755,
            _ => 0o644,
        }
    }

    pub fn from_octal_str(mode: &str) -> anyhow::Result<Self> {
        let mode = u32::from_str_radix(mode, 8)
            .map_err(|_| GotError::corrupt("entry mode", format!("'{mode}' is not octal")))?;
        EntryMode::try_from(mode)
    }

    /// Derive the mode of a working-tree path from its (symlink) metadata.
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        if metadata.file_type().is_symlink() {
            EntryMode::Symlink
        } else if metadata.is_dir() {
            EntryMode::Directory
        } else if path.is_executable() {
            EntryMode::File(FileMode::Executable)
        } else {
            EntryMode::File(FileMode::Regular)
        }
    }
}

impl TryFrom<u32> for EntryMode {
    type Error = anyhow::Error;

    fn try_from(mode: u32) -> anyhow::Result<Self> {
        match mode {
            0o100644 => Ok(EntryMode::File(FileMode::Regular)),
            0o100755 => Ok(EntryMode::File(FileMode::Executable)),
            0o120000 => Ok(EntryMode::Symlink),
            0o40000 => Ok(EntryMode::Directory),
            _ => Err(GotError::corrupt("entry mode", format!("unknown mode {mode:o}")).into()),
        }
    }
}

impl TryFrom<String> for EntryMode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        EntryMode::from_octal_str(&value)
    }
}

impl From<EntryMode> for String {
    fn from(mode: EntryMode) -> Self {
        mode.as_str().to_string()
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
