use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GotError;
use std::io::Write;

impl Repository {
    /// Store a commit of `tree` on top of `parent` and print its ID
    ///
    /// No ref moves.
    pub fn commit_tree(
        &self,
        tree_id: &str,
        parent: Option<&str>,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        let tree_id = self.find_object_id(tree_id)?;
        let parent = parent.map(|parent| self.find_object_id(parent)).transpose()?;

        let commit_id = self.store_commit(tree_id, parent, message)?;
        writeln!(self.writer(), "{commit_id}")?;

        Ok(commit_id)
    }

    pub(crate) fn store_commit(
        &self,
        tree_id: ObjectId,
        parent: Option<ObjectId>,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        let message = message.trim();
        if message.is_empty() {
            return Err(GotError::invalid("aborting commit due to empty commit message").into());
        }

        // both must exist and have the right type
        self.database().get_tree(&tree_id)?;
        if let Some(parent) = &parent {
            self.database().get_commit(parent)?;
        }

        let author = Author::load_from_env();
        let commit = Commit::new(tree_id, parent, &author, message.to_string());

        self.database().store(&commit)
    }
}
