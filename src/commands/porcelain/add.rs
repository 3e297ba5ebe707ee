use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::ErrorKind;
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Stage files, expanding directories
    ///
    /// Staged files that are gone from the working tree are unstaged.
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        for raw_path in paths {
            let path = self.workspace().relative_path(Path::new(raw_path))?;

            let files = match self.workspace().list_files(Some(&path)) {
                Ok(files) => files,
                Err(e)
                    if ErrorKind::of(&e) == ErrorKind::NotFound
                        && self.index().has_entry_for(&path) =>
                {
                    Vec::new()
                }
                Err(e) => return Err(e.context(format!("unable to add {raw_path}"))),
            };

            let stale = self
                .index()
                .entries_under_path(&path)
                .into_iter()
                .filter(|staged| files.binary_search(staged).is_err())
                .collect::<Vec<_>>();
            for staged in stale {
                self.index_mut()
                    .remove_file(&staged)
                    .with_context(|| format!("unable to unstage {staged}"))?;
            }

            for file in files {
                self.stage_file(&file)?;
            }
        }

        Ok(())
    }

    /// Hash, store and stage one working file with its current mode
    pub(crate) fn stage_file(&self, path: &str) -> anyhow::Result<ObjectId> {
        Workspace::check_trackable(path)?;
        let mode = self.workspace().file_mode(path)?;
        let blob = Blob::new(self.workspace().read_file(path)?);
        let blob_id = self
            .database()
            .store(&blob)
            .with_context(|| format!("unable to store {path}"))?;

        self.index_mut().add_file(path, blob_id.clone(), mode)?;

        Ok(blob_id)
    }
}
