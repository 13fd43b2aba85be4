//! Forbidden lanes for new branch heads
//!
//! A lane freed above the current row can still be crossed by a merge edge that
//! has not reached its target yet. Handing that lane to an unrelated branch head
//! would make the two lines cross, so for a commit with merge children (commits
//! listing it as a non-first parent) every lane touched between its earliest
//! merge child and its own row is off limits.

use crate::artifacts::graph::lanes::Lane;
use crate::artifacts::graph::layout::GraphRow;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::commit_hash::CommitHash;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
pub struct ForbiddenLaneAnalyzer {
    /// Earliest row listing the hash as a non-first parent
    first_merge_child: HashMap<CommitHash, usize>,
}

impl ForbiddenLaneAnalyzer {
    pub fn new(commits: &[Commit]) -> Self {
        let mut first_merge_child = HashMap::new();
        for (row, commit) in commits.iter().enumerate() {
            for parent in commit.parents().iter().skip(1) {
                first_merge_child.entry(parent.clone()).or_insert(row);
            }
        }

        Self { first_merge_child }
    }

    /// Lanes `hash` must not take at `row_index`
    ///
    /// `rows` holds the rows laid out so far; only merge children above
    /// `row_index` are considered.
    pub fn forbidden_lanes(
        &self,
        hash: &CommitHash,
        row_index: usize,
        rows: &[GraphRow],
    ) -> BTreeSet<Lane> {
        let mut forbidden = BTreeSet::new();

        let Some(&start) = self.first_merge_child.get(hash) else {
            return forbidden;
        };
        let end = row_index.min(rows.len());
        if start >= end {
            return forbidden;
        }

        for row in &rows[start..end] {
            forbidden.insert(row.lane);
            for edge in &row.edges {
                forbidden.insert(edge.from_lane);
                forbidden.insert(edge.to_lane);
            }
        }

        forbidden
    }
}
