use crate::GOT_DIR;
use crate::areas::repository::Repository;
use crate::errors::GotError;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Create an empty repository rooted at `path` and open it
    pub fn init(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let got_path = path.join(GOT_DIR);
        if got_path.exists() {
            return Err(GotError::invalid(format!(
                "repository already initialized in {}",
                got_path.display()
            ))
            .into());
        }

        fs::create_dir_all(got_path.join("objects"))
            .with_context(|| format!("unable to create {GOT_DIR}/objects"))?;
        fs::create_dir_all(got_path.join("refs").join("heads"))
            .with_context(|| format!("unable to create {GOT_DIR}/refs/heads"))?;
        fs::write(got_path.join("index"), b"")
            .with_context(|| format!("unable to create {GOT_DIR}/index"))?;
        fs::write(got_path.join("HEAD"), b"")
            .with_context(|| format!("unable to create {GOT_DIR}/HEAD"))?;

        let repository = Repository::open(path, writer)?;
        tracing::info!(path = %got_path.display(), "initialized repository");
        writeln!(
            repository.writer(),
            "Initialized empty got repository in {}",
            got_path.display()
        )?;

        Ok(repository)
    }
}
