//! Commit source backed by the repository's object database
//!
//! Walks the history with libgit2 in topological order, newest first among
//! unrelated commits, so that no commit is yielded before all of its children
//! even when timestamps are skewed.
//!
//! Ref names follow `git log --decorate=short`: `HEAD`, local branch names,
//! remote branches as `origin/main` and tags as `tag: v1.0`.

use crate::artifacts::log::source::CommitSource;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::commit_hash::CommitHash;
use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use derive_new::new;
use git2::{ErrorCode, Oid, Repository, Sort};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Commits fetched when the caller does not ask for a specific amount
pub const DEFAULT_LOG_LIMIT: usize = 50;

const HEAD: &str = "HEAD";

#[derive(Debug, Clone, new)]
pub struct GitLogSource {
    repo_path: PathBuf,
    /// Maximum number of commits, `None` for the whole history
    limit: Option<usize>,
    /// Walk every ref instead of `HEAD` only
    all: bool,
}

impl GitLogSource {
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}

impl CommitSource for GitLogSource {
    fn commits(&self) -> anyhow::Result<Vec<Commit>> {
        let repo = Repository::open(&self.repo_path).with_context(|| {
            format!("failed to open git repository at {}", self.repo_path.display())
        })?;

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        match repo.head() {
            Ok(_) => revwalk.push_head()?,
            // A freshly initialized repository has an unborn HEAD
            Err(err) if err.code() == ErrorCode::UnbornBranch && !self.all => {
                return Ok(Vec::new());
            }
            Err(err) if err.code() == ErrorCode::UnbornBranch => {}
            Err(err) => return Err(err).context("failed to read HEAD"),
        }
        if self.all {
            revwalk.push_glob("refs/*")?;
        }

        let refs = ref_names(&repo)?;
        let mut commits = Vec::new();
        for oid in revwalk.take(self.limit.unwrap_or(usize::MAX)) {
            let oid = oid?;
            match repo.find_commit(oid) {
                Ok(commit) => commits.push(to_commit(&commit, &refs)),
                Err(err) => tracing::warn!(%oid, %err, "skipping unreadable commit"),
            }
        }

        tracing::debug!(
            repo = %self.repo_path.display(),
            commits = commits.len(),
            all = self.all,
            "read commits from repository"
        );

        Ok(commits)
    }
}

/// Ref names per commit, `HEAD` first
fn ref_names(repo: &Repository) -> anyhow::Result<HashMap<Oid, Vec<String>>> {
    let mut refs: HashMap<Oid, Vec<String>> = HashMap::new();

    match repo.head() {
        Ok(head) => {
            if let Ok(commit) = head.peel_to_commit() {
                refs.entry(commit.id()).or_default().push(HEAD.to_string());
            }
        }
        Err(err) if err.code() == ErrorCode::UnbornBranch => {}
        Err(err) => return Err(err).context("failed to read HEAD"),
    }

    for reference in repo.references()? {
        let reference = reference?;
        let name = match reference.shorthand() {
            Some(name) if reference.is_tag() => format!("tag: {name}"),
            Some(name) if reference.is_branch() || reference.is_remote() => name.to_string(),
            _ => continue,
        };
        // Tags on trees or blobs decorate no commit
        if let Ok(commit) = reference.peel_to_commit() {
            refs.entry(commit.id()).or_default().push(name);
        }
    }

    for names in refs.values_mut() {
        names.sort_by(|a, b| (a != HEAD, a).cmp(&(b != HEAD, b)));
    }

    Ok(refs)
}

fn to_commit(commit: &git2::Commit<'_>, refs: &HashMap<Oid, Vec<String>>) -> Commit {
    let parents = commit
        .parent_ids()
        .map(|parent| CommitHash::from(parent.to_string()))
        .collect();
    let author = commit.author();
    let message = String::from_utf8_lossy(commit.message_bytes())
        .trim_end()
        .to_string();

    let converted = Commit::new(commit.id().to_string(), parents)
        .with_refs(refs.get(&commit.id()).cloned().unwrap_or_default())
        .with_author(
            String::from_utf8_lossy(author.name_bytes()).into_owned(),
            String::from_utf8_lossy(author.email_bytes()).into_owned(),
        )
        .with_message(message);

    match signature_date(author.when()) {
        Some(date) => converted.with_date(date),
        None => converted,
    }
}

fn signature_date(time: git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    DateTime::from_timestamp(time.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}
