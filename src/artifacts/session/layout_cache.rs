use crate::artifacts::graph::layout::{GraphLayout, build_graph};
use crate::artifacts::objects::commit::Commit;
use std::sync::Arc;

/// Last computed layout, keyed by the commit list it was built from
///
/// Scrolling, hovering or selecting never changes the commit list, so those
/// re-renders get the cached layout back instead of another layout pass.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entry: Option<(Vec<Commit>, Arc<GraphLayout>)>,
    hits: usize,
    misses: usize,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, commits: &[Commit]) -> Arc<GraphLayout> {
        if let Some((cached_commits, layout)) = &self.entry
            && cached_commits.as_slice() == commits
        {
            self.hits += 1;
            return Arc::clone(layout);
        }

        self.misses += 1;
        let layout = Arc::new(build_graph(commits));
        self.entry = Some((commits.to_vec(), Arc::clone(&layout)));
        layout
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
