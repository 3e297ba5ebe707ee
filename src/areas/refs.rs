//! References (HEAD and branches)
//!
//! ## File Format
//!
//! - `HEAD`: raw text, either empty, `refs/heads/<name>` or a 40-character object ID
//! - `refs/heads/<name>`: a 40-character commit ID
//!
//! Branch names may contain `/`, which maps onto nested directories.

use crate::DEFAULT_BRANCH;
use crate::areas::write_atomically;
use crate::artifacts::branch::REF_ALIASES;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GotError;
use anyhow::Context;
use derive_new::new;
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.got`)
    path: Box<Path>,
}

/// Every branch plus the one HEAD is on, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchListing {
    pub branches: Vec<BranchName>,
    pub current: Option<BranchName>,
}

impl Refs {
    pub fn read_head(&self) -> anyhow::Result<Head> {
        let text = match std::fs::read_to_string(self.head_path()) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GotError::not_found("ref", HEAD_REF_NAME).into());
            }
            Err(e) => return Err(anyhow::Error::new(e).context("unable to read HEAD")),
        };

        Head::parse(&text)
    }

    pub fn set_head(&self, head: &Head) -> anyhow::Result<()> {
        write_atomically(&self.head_path(), head.to_text().as_bytes())
            .context("unable to update HEAD")?;

        tracing::info!(head = %head.to_text(), "moved HEAD");
        Ok(())
    }

    /// Commit ID HEAD ultimately points at; `None` before the first commit
    pub fn resolve_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Empty => Ok(None),
            Head::Detached(id) => Ok(Some(id)),
            Head::Ref(branch) => self.read_branch(&branch),
        }
    }

    /// Resolve `HEAD`, `@`, `refs/heads/<name>` or a bare branch name
    pub fn resolve(&self, reference: &str) -> anyhow::Result<ObjectId> {
        let reference = REF_ALIASES.get(reference).copied().unwrap_or(reference);

        let id = if reference == HEAD_REF_NAME {
            self.resolve_head()?
        } else if reference.starts_with("refs/") {
            self.read_branch(&BranchName::try_from_ref_path(reference)?)?
        } else {
            self.read_branch(&BranchName::try_parse(reference)?)?
        };

        id.ok_or_else(|| GotError::not_found("ref", reference).into())
    }

    pub fn branch_exists(&self, branch: &BranchName) -> bool {
        self.branch_path(branch).is_file()
    }

    /// Point `branch` at `id`, creating it if needed
    pub fn update(&self, branch: &BranchName, id: &ObjectId) -> anyhow::Result<()> {
        write_atomically(&self.branch_path(branch), id.as_ref().as_bytes())
            .with_context(|| format!("unable to update branch {branch}"))?;

        tracing::info!(%branch, %id, "updated ref");
        Ok(())
    }

    /// Move whatever HEAD designates to a new commit
    ///
    /// The first commit creates the default branch and puts HEAD on it.
    pub fn advance_head(&self, id: &ObjectId) -> anyhow::Result<()> {
        match self.read_head()? {
            Head::Empty => {
                let branch = BranchName::try_parse(DEFAULT_BRANCH)?;
                self.update(&branch, id)?;
                self.set_head(&Head::Ref(branch))
            }
            Head::Ref(branch) => self.update(&branch, id),
            Head::Detached(_) => self.set_head(&Head::Detached(id.clone())),
        }
    }

    /// Create a branch at the commit HEAD points to
    pub fn create_branch(&self, branch: &BranchName) -> anyhow::Result<ObjectId> {
        let Some(id) = self.resolve_head()? else {
            return Err(GotError::invalid(format!(
                "cannot create branch '{branch}': no commits yet"
            ))
            .into());
        };

        self.create_branch_at(branch, &id)?;
        Ok(id)
    }

    pub fn create_branch_at(&self, branch: &BranchName, id: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch) {
            return Err(GotError::invalid(format!("branch '{branch}' already exists")).into());
        }

        self.update(branch, id)
    }

    /// Delete a branch, returning the commit it pointed to
    pub fn delete_branch(&self, branch: &BranchName) -> anyhow::Result<ObjectId> {
        let Some(id) = self.read_branch(branch)? else {
            return Err(GotError::invalid(format!("branch '{branch}' does not exist")).into());
        };
        if self.read_head()?.branch() == Some(branch) {
            return Err(GotError::invalid(format!(
                "cannot delete branch '{branch}': HEAD is on it"
            ))
            .into());
        }

        let branch_path = self.branch_path(branch);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("unable to delete branch {branch}"))?;
        self.prune_empty_parent_dirs(&branch_path)?;

        tracing::info!(%branch, %id, "deleted branch");
        Ok(id)
    }

    pub fn list_branches(&self) -> anyhow::Result<BranchListing> {
        let heads_path = self.heads_path();
        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(BranchListing {
            branches,
            current: self.read_head()?.branch().cloned(),
        })
    }

    /// Commit IDs mapped to the names pointing at them, HEAD included
    pub fn reverse_refs(&self) -> anyhow::Result<HashMap<ObjectId, Vec<String>>> {
        let mut refs: HashMap<ObjectId, Vec<String>> = HashMap::new();

        if let Some(id) = self.resolve_head()? {
            refs.entry(id).or_default().push(HEAD_REF_NAME.to_string());
        }
        for branch in self.list_branches()?.branches {
            if let Some(id) = self.read_branch(&branch)? {
                refs.entry(id).or_default().push(branch.to_string());
            }
        }

        Ok(refs)
    }

    fn read_branch(&self, branch: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let content = match std::fs::read_to_string(self.branch_path(branch)) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("unable to read branch {branch}")));
            }
        };

        match ObjectId::try_parse(content.trim()) {
            Ok(object_id) => Ok(Some(object_id)),
            Err(_) => Err(GotError::corrupt(
                "branch",
                format!("{branch} does not hold an object id"),
            )
            .into()),
        }
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("unable to remove empty branch directory {}", parent.display())
            })?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch: &BranchName) -> Box<Path> {
        self.path.join(branch.to_ref_path()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
