use crate::GOT_DIR;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::head::Head;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::status_tree::StatusTree;
use crate::errors::GotError;
use anyhow::Context;
use std::cell::{Ref, RefCell, RefMut};
use std::path::Path;

/// Handle on one repository
///
/// Owns every component; all operations go through it.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository whose working tree is rooted at `path`
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let got_path = path.join(GOT_DIR);
        if !got_path.is_dir() {
            return Err(GotError::not_found("repository", path.display().to_string()).into());
        }

        let index = Index::load(got_path.join("index").into_boxed_path())
            .context("unable to open the index")?;

        Ok(Repository {
            path: path.to_path_buf().into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database: Database::new(got_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.to_path_buf().into_boxed_path()),
            refs: Refs::new(got_path.into_boxed_path()),
        })
    }

    /// Open the closest repository at or above `start`
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let root = start
            .ancestors()
            .find(|dir| dir.join(GOT_DIR).is_dir())
            .ok_or_else(|| GotError::not_found("repository", start.display().to_string()))?;

        tracing::debug!(root = %root.display(), "discovered repository");
        Self::open(root, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn got_path(&self) -> Box<Path> {
        self.path.join(GOT_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Ref<'_, Index> {
        self.index.borrow()
    }

    pub fn index_mut(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn head(&self) -> anyhow::Result<Head> {
        self.refs.read_head()
    }

    pub fn head_id(&self) -> anyhow::Result<Option<ObjectId>> {
        self.refs.resolve_head()
    }

    /// Tree of the commit at HEAD; `None` before the first commit
    pub fn head_tree(&self) -> anyhow::Result<Option<Tree>> {
        self.head_id()?
            .map(|id| self.database.get_commit_tree(&id))
            .transpose()
            .context("unable to read the tree at HEAD")
    }

    /// Reconcile HEAD, the index and the working tree
    pub fn inspect(&self) -> anyhow::Result<StatusTree> {
        let head = self.head_tree()?;
        let worktree = self.workspace.snapshot()?;
        let index = self.index();
        let entries = index.sorted_entries().cloned().collect::<Vec<_>>();

        Inspector::new(&self.database).status(head.as_ref(), &entries, &worktree)
    }
}
