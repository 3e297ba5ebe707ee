use crate::areas::repository::Repository;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GotError;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

impl Repository {
    /// Undo changes to the given paths
    ///
    /// With `staged`, index entries go back to their HEAD version, or are
    /// dropped when HEAD lacks the path. Otherwise working files are
    /// overwritten with their HEAD version, falling back to the staged one
    /// for files HEAD does not know.
    pub fn restore(&self, paths: &[String], staged: bool) -> anyhow::Result<()> {
        let head = self.head_tree()?;

        for raw_path in paths {
            let path = self.workspace().relative_path(Path::new(raw_path))?;

            let head_entries = head
                .iter()
                .flat_map(|tree| tree.entries())
                .filter(|entry| is_under(&entry.name, &path))
                .map(|entry| (entry.name.clone(), (entry.id.clone(), entry.mode)))
                .collect::<BTreeMap<String, (ObjectId, EntryMode)>>();
            let staged_paths = self.index().entries_under_path(&path);

            if head_entries.is_empty() && staged_paths.is_empty() {
                return Err(GotError::not_found("file known to got", raw_path.as_str()).into());
            }

            if staged {
                self.unstage(&head_entries, &staged_paths)?;
            } else {
                self.discard(&head_entries, &staged_paths)?;
            }
        }

        Ok(())
    }

    fn unstage(
        &self,
        head_entries: &BTreeMap<String, (ObjectId, EntryMode)>,
        staged_paths: &[String],
    ) -> anyhow::Result<()> {
        for path in staged_paths {
            if !head_entries.contains_key(path) {
                self.index_mut()
                    .remove_file(path)
                    .with_context(|| format!("unable to unstage {path}"))?;
            }
        }
        for (path, (id, mode)) in head_entries {
            self.index_mut()
                .add_file(path, id.clone(), *mode)
                .with_context(|| format!("unable to unstage {path}"))?;
        }

        Ok(())
    }

    fn discard(
        &self,
        head_entries: &BTreeMap<String, (ObjectId, EntryMode)>,
        staged_paths: &[String],
    ) -> anyhow::Result<()> {
        let mut sources = head_entries.clone();
        for path in staged_paths {
            if !sources.contains_key(path)
                && let Some(entry) = self.index().entry(path)
            {
                sources.insert(path.clone(), (entry.id.clone(), entry.mode));
            }
        }

        for (path, (id, mode)) in sources {
            let blob = self.database().get_blob(&id)?;
            self.workspace()
                .write_file(&path, blob.content(), mode)
                .with_context(|| format!("unable to discard changes in {path}"))?;
        }

        Ok(())
    }
}

fn is_under(name: &str, path: &str) -> bool {
    path.is_empty()
        || name == path
        || name
            .strip_prefix(path)
            .is_some_and(|rest| rest.starts_with('/'))
}
