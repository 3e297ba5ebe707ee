use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Store the staged snapshot as a tree and print its ID
    pub fn write_tree(&self) -> anyhow::Result<ObjectId> {
        let tree_id = self.store_index_tree()?;

        writeln!(self.writer(), "{tree_id}")?;

        Ok(tree_id)
    }

    pub(crate) fn store_index_tree(&self) -> anyhow::Result<ObjectId> {
        let tree = Tree::build(self.index().sorted_entries());

        self.database()
            .store(&tree)
            .context("unable to write the index as a tree")
    }
}
