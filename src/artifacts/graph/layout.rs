//! Graph layout engine
//!
//! Lays out commits listed children first (as `git log` prints them) in a single
//! pass. Every call starts from an empty lane registry and color tracker, so the
//! result depends on nothing but the input slice.
//!
//! ## Per-commit steps
//!
//! 1. A commit whose hash an earlier child reserved takes that lane and color.
//! 2. Otherwise it is a new branch head: it takes the lowest free lane outside its
//!    forbidden set (or a new lane) and a fresh color.
//! 3. A root commit frees its lane.
//! 4. The first parent continues in the same lane with the same color, unless it
//!    already owns another lane; then the row merges into that lane (in the row's
//!    color) and frees its own.
//! 5. Every further parent either gets a new lane (branch-out edge, fresh color)
//!    or, when already placed, receives a merge-in edge in its own color.
//!
//! A first parent missing from a truncated log keeps the lane open down to the end
//! of the graph, where it shows up as an active lane; no connector is ever drawn
//! toward it. A first parent listed above its child ends the child's line at its
//! row. Further parents of either kind, repeated parents and self references are
//! skipped.

use crate::artifacts::graph::colors::{ColorId, ColorTracker};
use crate::artifacts::graph::edge::EdgeBuilder;
use crate::artifacts::graph::edge::{Edge, EdgeKind};
use crate::artifacts::graph::forbidden::ForbiddenLaneAnalyzer;
use crate::artifacts::graph::lanes::{Lane, LaneRegistry};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::commit_hash::CommitHash;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

/// Layout of one commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRow {
    pub commit: Commit,
    pub lane: Lane,
    pub color_id: ColorId,
    pub edges: Vec<Edge>,
    /// The row's line continues below it: its lane passes on to the first
    /// parent, or it has a connector. A commit whose parents are all unlisted
    /// or already drawn above reports `false` even though it lists parents.
    pub has_parents: bool,
    /// Some earlier row listed this commit as a parent
    pub has_children: bool,
}

impl GraphRow {
    pub fn connectors(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|edge| edge.is_connector())
    }

    pub fn verticals(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|edge| edge.kind == EdgeKind::Vertical)
    }
}

/// Lane still open after the last row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct ActiveLane {
    pub lane: Lane,
    pub color_id: ColorId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLayout {
    pub rows: Vec<GraphRow>,
    /// Highest lane index used; the graph is `max_lane + 1` columns wide
    pub max_lane: Lane,
    pub active_lanes: Vec<ActiveLane>,
}

impl GraphLayout {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.max_lane + 1
    }

    pub fn row_of(&self, hash: &CommitHash) -> Option<&GraphRow> {
        self.rows.iter().find(|row| row.commit.hash() == hash)
    }
}

/// Lay out `commits`, ordered children before parents
pub fn build_graph(commits: &[Commit]) -> GraphLayout {
    if commits.is_empty() {
        return GraphLayout::default();
    }

    let started = Instant::now();
    let layout = GraphLayoutEngine::new(commits).run();

    tracing::debug!(
        commits = commits.len(),
        max_lane = layout.max_lane,
        active_lanes = layout.active_lanes.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "built commit graph"
    );

    layout
}

/// Accumulator state scoped to one `build_graph` call
struct GraphLayoutEngine<'c> {
    commits: &'c [Commit],
    known: HashSet<&'c CommitHash>,
    visited: HashSet<&'c CommitHash>,
    referenced: HashSet<&'c CommitHash>,
    lanes: LaneRegistry,
    colors: ColorTracker,
    forbidden: ForbiddenLaneAnalyzer,
    rows: Vec<GraphRow>,
}

impl<'c> GraphLayoutEngine<'c> {
    fn new(commits: &'c [Commit]) -> Self {
        Self {
            commits,
            known: commits.iter().map(Commit::hash).collect(),
            visited: HashSet::with_capacity(commits.len()),
            referenced: HashSet::with_capacity(commits.len()),
            lanes: LaneRegistry::new(),
            colors: ColorTracker::new(),
            forbidden: ForbiddenLaneAnalyzer::new(commits),
            rows: Vec::with_capacity(commits.len()),
        }
    }

    fn run(mut self) -> GraphLayout {
        let commits = self.commits;
        for (row_index, commit) in commits.iter().enumerate() {
            let row = self.place(row_index, commit);
            self.rows.push(row);
        }

        let mut active_lanes = self
            .lanes
            .open_lanes()
            .map(|(lane, owner)| {
                ActiveLane::new(lane, self.colors.get(owner).unwrap_or_default())
            })
            .collect::<Vec<_>>();
        if active_lanes.is_empty()
            && let Some(last) = self.rows.last()
        {
            active_lanes.push(ActiveLane::new(last.lane, last.color_id));
        }

        GraphLayout {
            max_lane: self.lanes.max_lane(),
            rows: self.rows,
            active_lanes,
        }
    }

    fn place(&mut self, row_index: usize, commit: &'c Commit) -> GraphRow {
        let hash = commit.hash();
        let has_children = self.referenced.contains(hash);

        let lane = match self.lanes.reserved_lane(hash) {
            Some(lane) => lane,
            None => {
                let forbidden = self
                    .forbidden
                    .forbidden_lanes(hash, row_index, &self.rows);
                self.lanes.lowest_free(&forbidden)
            }
        };
        let color_id = self.colors.color_of(hash);
        self.lanes.claim(lane, hash.clone());
        self.visited.insert(hash);

        let mut edges = EdgeBuilder::new();
        edges.pass_through(&self.lanes, lane, &self.colors);

        let first_parent = commit.first_parent().filter(|parent| *parent != hash);
        let mut has_parents = false;

        match first_parent {
            None => self.lanes.release(lane),
            Some(parent) => {
                match self.lanes.reserved_lane(parent) {
                    Some(parent_lane) if self.will_have_row(parent) => {
                        edges.merge_in(lane, parent_lane, color_id);
                        self.lanes.release(lane);
                        has_parents = true;
                    }
                    // Another branch already carries the unlisted parent down
                    Some(_) => self.lanes.release(lane),
                    // Laid out above its child, so nothing below can be joined
                    None if self.visited.contains(parent) => self.lanes.release(lane),
                    None => {
                        self.colors.inherit(parent, color_id);
                        self.lanes.claim(lane, parent.clone());
                        has_parents = true;
                    }
                }
                self.referenced.insert(parent);
            }
        }

        for parent in self.other_parents(commit) {
            match self.lanes.reserved_lane(parent) {
                Some(parent_lane) => {
                    let parent_color = self.colors.color_of(parent);
                    edges.merge_in(lane, parent_lane, parent_color);
                }
                None => {
                    let new_lane = self.lanes.lowest_free(&BTreeSet::from([lane]));
                    let parent_color = self.colors.color_of(parent);
                    self.lanes.claim(new_lane, parent.clone());
                    edges.branch_out(lane, new_lane, parent_color);
                }
            }
            self.referenced.insert(parent);
            has_parents = true;
        }

        tracing::trace!(
            row = row_index,
            hash = %hash.to_short_hash(),
            lane,
            color = %color_id,
            open_lanes = self.lanes.open_count(),
            "placed commit"
        );

        GraphRow {
            commit: commit.clone(),
            lane,
            color_id,
            edges: edges.build(),
            has_parents,
            has_children,
        }
    }

    /// Whether `hash` is listed and has not been laid out yet
    fn will_have_row(&self, hash: &CommitHash) -> bool {
        self.known.contains(hash) && !self.visited.contains(hash)
    }

    /// Non-first parents that will still get a row, without repeats
    fn other_parents(&self, commit: &'c Commit) -> Vec<&'c CommitHash> {
        let hash = commit.hash();
        let mut seen = HashSet::new();
        seen.insert(hash);
        seen.extend(commit.first_parent());

        commit
            .parents()
            .iter()
            .skip(1)
            .filter(|parent| self.will_have_row(parent))
            .filter(|parent| seen.insert(*parent))
            .collect()
    }
}
