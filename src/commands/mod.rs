//! CLI operations, implemented on [`Repository`]
//!
//! - `layout`: graph layout as JSON
//! - `log`: text graph of the history
//! - `viewport`: visible row range for a scroll position
//!
//! Every command builds a fresh [`GraphSession`] and refreshes it once, so the
//! binary never hits the layout cache and never discards a stale refresh. Those
//! paths serve long-lived callers that keep one session per repository view.

pub mod layout;
pub mod log;
pub mod viewport;

use crate::areas::repository::Repository;
use crate::artifacts::graph::layout::GraphLayout;
use crate::artifacts::log::source::{CommitSource, JsonFileSource, StdinSource};
use crate::artifacts::session::graph_session::GraphSession;
use derive_new::new;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a command reads its commit list from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitInput {
    /// History of the repository, read with libgit2
    Repository,
    /// JSON array of commits in a file
    File(PathBuf),
    /// JSON array of commits on stdin
    Stdin,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct HistoryOptions {
    pub input: CommitInput,
    /// Maximum number of commits read from git, `None` for all of them
    pub limit: Option<usize>,
    /// Read every ref instead of `HEAD` only
    pub all: bool,
}

impl Repository {
    /// Fetch the commit list and lay it out
    pub async fn load_layout(&self, history: &HistoryOptions) -> anyhow::Result<Arc<GraphLayout>> {
        match &history.input {
            CommitInput::Repository => {
                refresh_layout(self.log_source(history.limit, history.all)).await
            }
            CommitInput::File(path) => refresh_layout(JsonFileSource::new(path.clone())).await,
            CommitInput::Stdin => refresh_layout(StdinSource).await,
        }
    }
}

async fn refresh_layout<S>(source: S) -> anyhow::Result<Arc<GraphLayout>>
where
    S: CommitSource + 'static,
{
    let session = GraphSession::new(source);
    let layout = match session.refresh().await? {
        Some(layout) => layout,
        None => session
            .current()
            .await
            .ok_or_else(|| anyhow::anyhow!("layout was superseded by a newer refresh"))?,
    };

    let (hits, misses) = session.cache_stats().await;
    tracing::debug!(rows = layout.rows.len(), hits, misses, "layout ready");
    Ok(layout)
}
