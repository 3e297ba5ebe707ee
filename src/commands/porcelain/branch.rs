use crate::areas::refs::BranchListing;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create a branch at `start`, or at HEAD when `start` is `None`
    pub fn create_branch(&self, name: &str, start: Option<&str>) -> anyhow::Result<ObjectId> {
        let branch = BranchName::try_parse(name)?;

        match start {
            Some(start) => {
                let start_id = Revision::try_parse(start)?.resolve(self)?;
                self.refs().create_branch_at(&branch, &start_id)?;
                Ok(start_id)
            }
            None => self.refs().create_branch(&branch),
        }
    }

    pub fn delete_branch(&self, name: &str) -> anyhow::Result<ObjectId> {
        let branch = BranchName::try_parse(name)?;
        let commit_id = self.refs().delete_branch(&branch)?;

        writeln!(
            self.writer(),
            "Deleted branch {branch} (was {}).",
            commit_id.to_short_oid()
        )?;

        Ok(commit_id)
    }

    /// Print every branch, marking the current one
    pub fn list_branches(&self) -> anyhow::Result<BranchListing> {
        let listing = self.refs().list_branches()?;

        for branch in &listing.branches {
            if listing.current.as_ref() == Some(branch) {
                writeln!(self.writer(), "* {}", branch.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {branch}")?;
            }
        }

        Ok(listing)
    }
}
