use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_algorithm::{DiffAlgorithm, EditKind, LcsDiff};
use crate::artifacts::diff::diff_target::DiffTarget;
use crate::artifacts::diff::hunk::Hunk;
use crate::artifacts::objects::tree::Tree;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Unified diff of the index against the working tree, or of HEAD against
    /// the index when `cached`
    ///
    /// Empty `paths` means the whole repository.
    pub fn diff(&self, paths: &[String], cached: bool) -> anyhow::Result<()> {
        let prefixes = paths
            .iter()
            .map(|path| self.workspace().relative_path(Path::new(path)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let selected = |path: &str| {
            prefixes.is_empty()
                || prefixes.iter().any(|prefix| {
                    prefix.is_empty()
                        || path == prefix
                        || path
                            .strip_prefix(prefix.as_str())
                            .is_some_and(|rest| rest.starts_with('/'))
                })
        };

        let report = self.inspect()?.report();
        let head = self.head_tree()?;

        for (path, changes) in report.changed.iter().filter(|(path, _)| selected(path)) {
            if cached && changes.head.is_some() {
                let a = self.head_target(path, head.as_ref())?;
                let b = self.index_target(path)?;
                self.print_diff(&a, &b)?;
            } else if !cached && changes.worktree.is_some() {
                let a = self.index_target(path)?;
                let b = self.worktree_target(path)?;
                self.print_diff(&a, &b)?;
            }
        }

        Ok(())
    }

    fn head_target(&self, path: &str, head: Option<&Tree>) -> anyhow::Result<DiffTarget> {
        match head.and_then(|tree| tree.entry(path)) {
            Some(entry) => Ok(DiffTarget::new(
                path.to_string(),
                entry.id.clone(),
                Some(entry.mode),
                self.database().get_blob(&entry.id)?.into_content(),
            )),
            None => DiffTarget::from_nothing(path),
        }
    }

    fn index_target(&self, path: &str) -> anyhow::Result<DiffTarget> {
        let entry = self.index().entry(path).cloned();

        match entry {
            Some(entry) => Ok(DiffTarget::new(
                path.to_string(),
                entry.id.clone(),
                Some(entry.mode),
                self.database().get_blob(&entry.id)?.into_content(),
            )),
            None => DiffTarget::from_nothing(path),
        }
    }

    fn worktree_target(&self, path: &str) -> anyhow::Result<DiffTarget> {
        if !self.workspace().exists(path) {
            return DiffTarget::from_nothing(path);
        }

        let data = self.workspace().read_file(path)?;
        Ok(DiffTarget::new(
            path.to_string(),
            crate::artifacts::objects::object_id::ObjectId::from_content(&data),
            Some(self.workspace().file_mode(path)?),
            data,
        ))
    }

    fn print_diff(&self, a: &DiffTarget, b: &DiffTarget) -> anyhow::Result<()> {
        if a.id == b.id && a.mode == b.mode {
            return Ok(());
        }

        writeln!(
            self.writer(),
            "{}",
            format!("diff --git a/{} b/{}", a.path, b.path).bold()
        )?;
        self.print_diff_mode(a, b)?;
        self.print_diff_content(a, b)?;

        Ok(())
    }

    fn print_diff_mode(&self, a: &DiffTarget, b: &DiffTarget) -> anyhow::Result<()> {
        if !a.exists() {
            writeln!(
                self.writer(),
                "{}",
                format!("new file mode {}", b.pretty_mode()).bold()
            )?;
        } else if !b.exists() {
            writeln!(
                self.writer(),
                "{}",
                format!("deleted file mode {}", a.pretty_mode()).bold()
            )?;
        } else if a.mode != b.mode {
            writeln!(
                self.writer(),
                "{}",
                format!("old mode {}", a.pretty_mode()).bold()
            )?;
            writeln!(
                self.writer(),
                "{}",
                format!("new mode {}", b.pretty_mode()).bold()
            )?;
        }

        Ok(())
    }

    fn print_diff_content(&self, a: &DiffTarget, b: &DiffTarget) -> anyhow::Result<()> {
        if a.id == b.id {
            return Ok(());
        }

        let mut id_range = format!("index {}..{}", a.id.to_short_oid(), b.id.to_short_oid());
        if a.mode == b.mode {
            id_range.push_str(&format!(" {}", a.pretty_mode()));
        }

        writeln!(self.writer(), "{}", id_range.bold())?;
        writeln!(self.writer(), "{}", format!("--- {}", a.diff_path("a")).bold())?;
        writeln!(self.writer(), "{}", format!("+++ {}", b.diff_path("b")).bold())?;

        let hunks = LcsDiff::new(&a.data, &b.data).flatten_diff();
        for hunk in hunks {
            self.print_diff_hunk(&hunk)?;
        }

        Ok(())
    }

    fn print_diff_hunk(&self, hunk: &Hunk<'_>) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", hunk.header().cyan())?;

        for edit in hunk.edits() {
            let line = edit.to_string();
            match edit.kind {
                EditKind::Insert => writeln!(self.writer(), "{}", line.green())?,
                EditKind::Delete => writeln!(self.writer(), "{}", line.red())?,
                EditKind::Equal => writeln!(self.writer(), "{line}")?,
            }
            if !edit.has_newline() {
                writeln!(self.writer(), "\\ No newline at end of file")?;
            }
        }

        Ok(())
    }
}
