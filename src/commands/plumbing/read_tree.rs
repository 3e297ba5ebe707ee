use crate::areas::repository::Repository;
use anyhow::Context;

impl Repository {
    /// Stage every entry of a stored tree, keeping other staged files
    pub fn read_tree(&self, tree_id: &str) -> anyhow::Result<()> {
        let tree_id = self.find_object_id(tree_id)?;
        let tree = self.database().get_tree(&tree_id)?;

        self.index_mut()
            .add_tree_contents(&tree)
            .with_context(|| format!("unable to read tree {tree_id}"))
    }
}
