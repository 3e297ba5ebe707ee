use crate::areas::repository::Repository;
use crate::errors::GotError;
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Restage tracked files from the working tree
    ///
    /// A tracked file gone from the working tree is unstaged. Untracked files
    /// are staged only with `add`.
    pub fn update_index(&self, files: &[String], add: bool) -> anyhow::Result<()> {
        for file in files {
            let path = self.workspace().relative_path(Path::new(file))?;
            let tracked = self.index().entry(&path).is_some();

            if !tracked && !add {
                return Err(GotError::invalid(format!(
                    "{path} is not in the index; use --add to stage it"
                ))
                .into());
            }

            if self.workspace().exists(&path) {
                self.stage_file(&path)?;
            } else if tracked {
                self.index_mut()
                    .remove_file(&path)
                    .with_context(|| format!("unable to update {path}"))?;
            } else {
                return Err(GotError::not_found("file", path).into());
            }
        }

        Ok(())
    }
}
