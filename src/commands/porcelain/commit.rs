use crate::areas::repository::Repository;
use crate::artifacts::branch::head::Head;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Record the staged snapshot on top of HEAD and advance HEAD
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        let parent = self.head_id()?;
        let tree_id = self.store_index_tree()?;
        let commit_id = self
            .store_commit(tree_id, parent.clone(), message)
            .context("unable to commit")?;
        self.refs().advance_head(&commit_id)?;

        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };
        let head = match self.head()? {
            Head::Ref(branch) => branch.to_string(),
            _ => "detached HEAD".to_string(),
        };
        let commit = self.database().get_commit(&commit_id)?;

        writeln!(
            self.writer(),
            "[{head} {is_root}{}] {}",
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}
