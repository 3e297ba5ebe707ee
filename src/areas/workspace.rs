//! Working tree access
//!
//! Paths handed in and out of the workspace are repository-relative and
//! always `/`-separated, whatever the platform.

use crate::GOT_DIR;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::status::worktree_file::WorktreeFile;
use crate::errors::GotError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 2] = [GOT_DIR, ".git"];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Files below `dir` (the whole tree when `None`), sorted
    ///
    /// A path naming a file yields just that file.
    pub fn list_files(&self, dir: Option<&str>) -> anyhow::Result<Vec<String>> {
        let root = match dir {
            Some(dir) if !dir.is_empty() => {
                Self::check_trackable(dir)?;
                self.absolute(dir)
            }
            _ => self.path.to_path_buf(),
        };

        let metadata = match std::fs::symlink_metadata(&root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GotError::not_found("path", dir.unwrap_or(".")).into());
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("unable to stat {}", root.display())));
            }
        };
        if !metadata.is_dir() {
            return Ok(vec![self.to_relative(&root)?]);
        }

        let mut files = WalkDir::new(&root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.file_name().to_string_lossy().as_ref()))
            .filter_map(Result::ok)
            .filter(|entry| !entry.file_type().is_dir())
            .map(|entry| self.to_relative(entry.path()))
            .collect::<anyhow::Result<Vec<_>>>()?;
        files.sort();

        Ok(files)
    }

    /// Hash every file of the working tree
    pub fn snapshot(&self) -> anyhow::Result<Vec<WorktreeFile>> {
        self.list_files(None)?
            .into_iter()
            .map(|path| {
                let mode = self.file_mode(&path)?;
                let content = self.read_file(&path)?;

                Ok(WorktreeFile::new(path, mode, content))
            })
            .collect()
    }

    /// File content; for a symlink, the path it points to
    pub fn read_file(&self, path: &str) -> anyhow::Result<Bytes> {
        let file_path = self.absolute(path);

        let metadata = self.metadata(path)?;
        if metadata.file_type().is_symlink() {
            let target = std::fs::read_link(&file_path)
                .with_context(|| format!("unable to read link {path}"))?;
            return Ok(Bytes::from(target.to_string_lossy().into_owned()));
        }

        let content =
            std::fs::read(&file_path).with_context(|| format!("unable to read file {path}"))?;
        Ok(Bytes::from(content))
    }

    pub fn file_mode(&self, path: &str) -> anyhow::Result<EntryMode> {
        let metadata = self.metadata(path)?;

        Ok(EntryMode::from_metadata(&self.absolute(path), &metadata))
    }

    pub fn exists(&self, path: &str) -> bool {
        std::fs::symlink_metadata(self.absolute(path)).is_ok()
    }

    /// Materialise `content` at `path`, replacing whatever is in the way
    pub fn write_file(&self, path: &str, content: &[u8], mode: EntryMode) -> anyhow::Result<()> {
        Self::check_trackable(path)?;
        let file_path = self.absolute(path);
        self.clear_way(path)?;

        if mode == EntryMode::Symlink {
            #[cfg(unix)]
            {
                let target = String::from_utf8_lossy(content).into_owned();
                std::os::unix::fs::symlink(target, &file_path)
                    .with_context(|| format!("unable to create link {path}"))?;
                return Ok(());
            }
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("unable to write file {path}"))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(mode.permissions());
            std::fs::set_permissions(&file_path, permissions)
                .with_context(|| format!("unable to set permissions of {path}"))?;
        }

        Ok(())
    }

    /// Delete a file and any directory it leaves empty
    pub fn remove_file(&self, path: &str) -> anyhow::Result<()> {
        Self::check_trackable(path)?;
        let file_path = self.absolute(path);

        match std::fs::remove_file(&file_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!("unable to remove file {path}")));
            }
        }

        self.prune_empty_parent_dirs(&file_path)
    }

    /// Repository-relative form of `path`
    ///
    /// Relative inputs are taken relative to the workspace root. `.` and `..`
    /// are resolved lexically; a path escaping the workspace is rejected.
    pub fn relative_path(&self, path: &Path) -> anyhow::Result<String> {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };

        let mut normalized = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                other => normalized.push(other),
            }
        }

        self.to_relative(&normalized)
    }

    fn to_relative(&self, path: &Path) -> anyhow::Result<String> {
        let relative = path.strip_prefix(&self.path).map_err(|_| {
            GotError::invalid(format!("{} is outside the repository", path.display()))
        })?;

        Ok(relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"))
    }

    fn absolute(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.path.to_path_buf(), |acc, segment| acc.join(segment))
    }

    fn metadata(&self, path: &str) -> anyhow::Result<std::fs::Metadata> {
        match std::fs::symlink_metadata(self.absolute(path)) {
            Ok(metadata) => Ok(metadata),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(GotError::not_found("file", path).into())
            }
            Err(e) => Err(anyhow::Error::new(e).context(format!("unable to stat {path}"))),
        }
    }

    fn is_ignored(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }

    /// Paths inside a repository directory can never be staged or written
    pub fn check_trackable(path: &str) -> anyhow::Result<()> {
        if path.split('/').any(Self::is_ignored) {
            return Err(
                GotError::invalid(format!("{path} is inside a repository directory")).into(),
            );
        }

        Ok(())
    }

    /// Files standing where a parent directory must go are removed, as is
    /// anything already at `path`
    fn clear_way(&self, path: &str) -> anyhow::Result<()> {
        let mut current = self.path.to_path_buf();
        let segments = path.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>();
        let Some((file_name, dirs)) = segments.split_last() else {
            return Err(GotError::invalid("cannot write the workspace root").into());
        };

        for dir in dirs {
            current.push(dir);
            match std::fs::symlink_metadata(&current) {
                Ok(metadata) if metadata.is_dir() => continue,
                Ok(_) => std::fs::remove_file(&current)
                    .with_context(|| format!("unable to remove {}", current.display()))?,
                Err(_) => {}
            }
            std::fs::create_dir(&current)
                .with_context(|| format!("unable to create directory {}", current.display()))?;
        }

        current.push(file_name);
        match std::fs::symlink_metadata(&current) {
            Ok(metadata) if metadata.is_dir() => std::fs::remove_dir_all(&current)
                .with_context(|| format!("unable to remove directory {}", current.display()))?,
            Ok(_) => std::fs::remove_file(&current)
                .with_context(|| format!("unable to remove {}", current.display()))?,
            Err(_) => {}
        }

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("unable to remove directory {}", parent.display()))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
