use crate::artifacts::log::git_log::GitLogSource;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Working directory the commands run against, plus their output sink
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path)
            .canonicalize()
            .with_context(|| format!("repository path {path} does not exist"))?;

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// History reader for this repository
    pub fn log_source(&self, limit: Option<usize>, all: bool) -> GitLogSource {
        GitLogSource::new(self.path.to_path_buf(), limit, all)
    }
}
