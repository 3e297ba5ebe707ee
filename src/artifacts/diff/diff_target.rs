use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;

const NULL_OID_RAW: &str = "0000000000000000000000000000000000000000";
const NULL_PATH: &str = "/dev/null";

/// One side of a rendered file diff
#[derive(Debug, Clone, new)]
pub struct DiffTarget {
    pub(crate) path: String,
    pub(crate) id: ObjectId,
    pub(crate) mode: Option<EntryMode>,
    pub(crate) data: Bytes,
}

impl DiffTarget {
    /// The side of a file that does not exist
    pub fn from_nothing(path: &str) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.to_string(),
            id: ObjectId::try_parse(NULL_OID_RAW)?,
            mode: None,
            data: Bytes::new(),
        })
    }

    pub fn exists(&self) -> bool {
        self.mode.is_some()
    }

    /// Path shown in the `---`/`+++` lines
    pub fn diff_path(&self, prefix: &str) -> String {
        if self.exists() {
            format!("{prefix}/{}", self.path)
        } else {
            NULL_PATH.to_string()
        }
    }

    pub fn pretty_mode(&self) -> &'static str {
        self.mode.unwrap_or_default().as_str()
    }

    pub fn content(&self) -> Option<&[u8]> {
        self.exists().then_some(self.data.as_ref())
    }
}
