//! Where commit lists come from
//!
//! The layout engine only needs an ordered `Vec<Commit>`, children before
//! parents. Sources hide whether that list came from `git`, a JSON file or
//! memory.

use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use derive_new::new;
use std::path::PathBuf;

pub trait CommitSource: Send + Sync {
    /// Ordered commit list, children before parents
    fn commits(&self) -> anyhow::Result<Vec<Commit>>;
}

/// Commits held in memory
#[derive(Debug, Clone, Default, new)]
pub struct VecSource {
    commits: Vec<Commit>,
}

impl CommitSource for VecSource {
    fn commits(&self) -> anyhow::Result<Vec<Commit>> {
        Ok(self.commits.clone())
    }
}

/// JSON array of commits stored in a file
#[derive(Debug, Clone, new)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl CommitSource for JsonFileSource {
    fn commits(&self) -> anyhow::Result<Vec<Commit>> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read commits from {}", self.path.display()))?;
        parse_commits_json(&json)
            .with_context(|| format!("invalid commit list in {}", self.path.display()))
    }
}

/// JSON array of commits piped on standard input
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl CommitSource for StdinSource {
    fn commits(&self) -> anyhow::Result<Vec<Commit>> {
        let json =
            std::io::read_to_string(std::io::stdin()).context("failed to read commits from stdin")?;
        parse_commits_json(&json).context("invalid commit list on stdin")
    }
}

/// Parse a JSON array of commits
pub fn parse_commits_json(json: &str) -> anyhow::Result<Vec<Commit>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).context("expected a JSON array of commits")
}
