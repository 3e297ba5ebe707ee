use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::branch::head::Head;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::collections::HashMap;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Where the walk starts; HEAD when `None`
    pub revision: Option<String>,
    pub max_count: Option<usize>,
    pub oneline: bool,
}

impl Repository {
    /// Commits from `start` following parent links, newest first
    ///
    /// `start` defaults to HEAD; an empty repository has no history.
    pub fn history(
        &self,
        start: Option<ObjectId>,
        max_count: Option<usize>,
    ) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let start = match start {
            Some(start) => Some(start),
            None => self.head_id()?,
        };

        RevList::new(self.database(), start, max_count)
            .into_iter()
            .collect()
    }

    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<Vec<ObjectId>> {
        let start = opts
            .revision
            .as_deref()
            .map(|revision| Revision::try_parse(revision)?.resolve(self))
            .transpose()?;

        let history = self.history(start, opts.max_count)?;
        let decorations = self.decorations()?;

        for (idx, (commit_id, commit)) in history.iter().enumerate() {
            let decoration = decorations
                .get(commit_id)
                .map(|names| format!(" ({names})"))
                .unwrap_or_default();

            if opts.oneline {
                writeln!(
                    self.writer(),
                    "{}{decoration} {}",
                    commit_id.to_short_oid().yellow(),
                    commit.short_message()
                )?;
                continue;
            }

            if idx > 0 {
                writeln!(self.writer())?;
            }
            self.show_commit_medium(commit_id, commit, &decoration)?;
        }

        Ok(history.into_iter().map(|(commit_id, _)| commit_id).collect())
    }

    fn show_commit_medium(
        &self,
        commit_id: &ObjectId,
        commit: &Commit,
        decoration: &str,
    ) -> anyhow::Result<()> {
        let author = commit.author()?;

        writeln!(
            self.writer(),
            "{}{decoration}",
            format!("commit {commit_id}").yellow()
        )?;
        writeln!(self.writer(), "Author: {}", author.display_name())?;
        writeln!(self.writer(), "Date:   {}", author.readable_timestamp())?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {message_line}")?;
        }

        Ok(())
    }

    /// `HEAD -> master, topic` style labels keyed by commit
    fn decorations(&self) -> anyhow::Result<HashMap<ObjectId, String>> {
        let head = self.head()?;

        Ok(self
            .refs()
            .reverse_refs()?
            .into_iter()
            .map(|(commit_id, mut names)| {
                names.sort();
                let has_head = names.iter().any(|name| name == HEAD_REF_NAME);
                let mut branches = names
                    .into_iter()
                    .filter(|name| name != HEAD_REF_NAME)
                    .collect::<Vec<_>>();

                let mut labels = Vec::new();
                match &head {
                    Head::Ref(current) if has_head => {
                        let current: &str = current.as_ref();
                        branches.retain(|name| name != current);
                        labels.push(format!(
                            "{} -> {}",
                            HEAD_REF_NAME.cyan().bold(),
                            current.green().bold()
                        ));
                    }
                    _ if has_head => labels.push(HEAD_REF_NAME.cyan().bold().to_string()),
                    _ => {}
                }
                labels.extend(branches.iter().map(|name| name.green().bold().to_string()));

                (commit_id, labels.join(", "))
            })
            .collect())
    }
}
