use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Blob ID of a working file, stored when `write` is set
    pub fn hash_object(&self, file: &str, write: bool) -> anyhow::Result<ObjectId> {
        let path = self.workspace().relative_path(Path::new(file))?;
        let blob = Blob::new(
            self.workspace()
                .read_file(&path)
                .with_context(|| format!("unable to hash {path}"))?,
        );

        let object_id = if write {
            self.database().store(&blob)?
        } else {
            blob.object_id()?
        };

        writeln!(self.writer(), "{object_id}")?;

        Ok(object_id)
    }
}
