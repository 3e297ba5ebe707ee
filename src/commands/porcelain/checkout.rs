use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::GotError;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Switch to a branch, or detach HEAD at a commit
    ///
    /// Refuses while anything is staged or modified. With `create`, the branch
    /// is created at the current commit once the working tree and index have
    /// been switched, so a failed checkout leaves no branch behind.
    pub fn checkout(&self, target: &str, create: bool) -> anyhow::Result<Head> {
        if !self.inspect()?.report().is_clean() {
            return Err(GotError::invalid(
                "cannot checkout with uncommitted changes; commit or restore them first",
            )
            .into());
        }

        let (head, commit_id) = if create {
            self.new_branch_target(target)?
        } else {
            self.resolve_checkout_target(target)?
        };

        let target_tree = self.database().get_commit_tree(&commit_id)?;
        let current_tree = self.head_tree()?.unwrap_or_default();
        self.migrate_workspace(&current_tree, &target_tree)
            .with_context(|| format!("unable to check out {target}"))?;
        self.index_mut().reset_to_tree(&target_tree)?;
        if let (true, Head::Ref(branch)) = (create, &head) {
            self.refs().create_branch_at(branch, &commit_id)?;
        }
        self.refs().set_head(&head)?;

        match &head {
            Head::Ref(branch) if create => {
                writeln!(self.writer(), "Switched to a new branch '{branch}'")?
            }
            Head::Ref(branch) => writeln!(self.writer(), "Switched to branch '{branch}'")?,
            _ => {
                let commit = self.database().get_commit(&commit_id)?;
                writeln!(
                    self.writer(),
                    "HEAD is now at {} {}",
                    commit_id.to_short_oid(),
                    commit.short_message()
                )?
            }
        }

        Ok(head)
    }

    /// Branch `target` would be created at the current commit; nothing is written
    fn new_branch_target(&self, target: &str) -> anyhow::Result<(Head, ObjectId)> {
        let branch = BranchName::try_parse(target)?;
        if self.refs().branch_exists(&branch) {
            return Err(GotError::invalid(format!("branch '{branch}' already exists")).into());
        }
        let Some(commit_id) = self.head_id()? else {
            return Err(GotError::invalid(format!(
                "cannot create branch '{branch}': no commits yet"
            ))
            .into());
        };

        Ok((Head::Ref(branch), commit_id))
    }

    fn resolve_checkout_target(&self, target: &str) -> anyhow::Result<(Head, ObjectId)> {
        let revision = Revision::try_parse(target)?;

        if let Some(branch) = revision.branch(self) {
            let commit_id = self.refs().resolve(branch.as_ref())?;
            return Ok((Head::Ref(branch), commit_id));
        }
        if revision == Revision::Head {
            let commit_id = revision.resolve(self)?;
            return Ok((self.head()?, commit_id));
        }

        let commit_id = revision.resolve(self)?;
        Ok((Head::Detached(commit_id.clone()), commit_id))
    }

    /// Make the working tree match `target`, given that it matches `current`
    fn migrate_workspace(&self, current: &Tree, target: &Tree) -> anyhow::Result<()> {
        for entry in target.entries() {
            if current.entry(&entry.name).is_none() && self.workspace().exists(&entry.name) {
                return Err(GotError::invalid(format!(
                    "untracked working tree file {} would be overwritten by checkout",
                    entry.name
                ))
                .into());
            }
        }

        for entry in current.entries() {
            if target.entry(&entry.name).is_none() {
                self.workspace().remove_file(&entry.name)?;
            }
        }

        for entry in target.entries() {
            if current.entry(&entry.name) == Some(entry) {
                continue;
            }

            let blob = self.database().get_blob(&entry.id)?;
            self.workspace()
                .write_file(&entry.name, blob.content(), entry.mode)?;
        }

        tracing::debug!(entries = target.entries().len(), "migrated working tree");
        Ok(())
    }
}
