use crate::artifacts::graph::layout::GraphLayout;
use crate::artifacts::log::source::CommitSource;
use crate::artifacts::session::generation::{Generation, Ticket};
use crate::artifacts::session::layout_cache::LayoutCache;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct SessionState {
    cache: LayoutCache,
    published: Option<(Ticket, Arc<GraphLayout>)>,
}

/// Layout state of one repository view
///
/// Refreshes may overlap; a refresh publishes its layout only while it is still
/// the latest one requested, so a slow fetch can never overwrite a newer graph.
pub struct GraphSession<S> {
    source: Arc<S>,
    generation: Generation,
    state: Mutex<SessionState>,
}

impl<S> GraphSession<S>
where
    S: CommitSource + 'static,
{
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            generation: Generation::new(),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch commits and publish their layout
    ///
    /// Returns `Ok(None)` when a newer refresh was requested meanwhile; the
    /// published layout is left untouched in that case.
    pub async fn refresh(&self) -> anyhow::Result<Option<Arc<GraphLayout>>> {
        let ticket = self.generation.next();

        let source = Arc::clone(&self.source);
        let commits = tokio::task::spawn_blocking(move || source.commits())
            .await
            .context("commit fetch task failed")??;

        let mut state = self.state.lock().await;
        if !self.generation.is_current(ticket) {
            tracing::debug!(ticket = ticket.get(), "discarding stale commit list");
            return Ok(None);
        }

        let layout = state.cache.get_or_build(&commits);
        state.published = Some((ticket, Arc::clone(&layout)));

        Ok(Some(layout))
    }

    /// Most recently published layout
    pub async fn current(&self) -> Option<Arc<GraphLayout>> {
        let state = self.state.lock().await;
        state
            .published
            .as_ref()
            .map(|(_, layout)| Arc::clone(layout))
    }

    /// Cache hits and misses so far
    pub async fn cache_stats(&self) -> (usize, usize) {
        let state = self.state.lock().await;
        (state.cache.hits(), state.cache.misses())
    }
}
