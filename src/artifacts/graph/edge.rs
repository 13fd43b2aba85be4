//! Connector edges drawn for a graph row
//!
//! - `vertical`: another branch passing straight through this row
//! - `merge-in`: this row's lane joining a lane a parent already occupies
//! - `branch-out`: a new lane spawned below this row for an unplaced parent

use crate::artifacts::graph::colors::{ColorId, ColorTracker};
use crate::artifacts::graph::lanes::{Lane, LaneRegistry};
use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Vertical,
    MergeIn,
    BranchOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub from_lane: Lane,
    pub to_lane: Lane,
    pub color_id: ColorId,
}

impl Edge {
    pub fn is_connector(&self) -> bool {
        self.kind != EdgeKind::Vertical
    }
}

/// Collects the edges of one row
///
/// Pass-through verticals come first in lane order, followed by the row's
/// connectors in parent order.
#[derive(Debug, Default)]
pub struct EdgeBuilder {
    edges: Vec<Edge>,
}

impl EdgeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One vertical per open lane other than `own_lane`
    pub fn pass_through(&mut self, lanes: &LaneRegistry, own_lane: Lane, colors: &ColorTracker) {
        self.edges.extend(
            lanes
                .open_lanes()
                .filter(|(lane, _)| *lane != own_lane)
                .map(|(lane, owner)| {
                    Edge::new(
                        EdgeKind::Vertical,
                        lane,
                        lane,
                        colors.get(owner).unwrap_or_default(),
                    )
                }),
        );
    }

    pub fn merge_in(&mut self, from_lane: Lane, to_lane: Lane, color_id: ColorId) {
        self.edges
            .push(Edge::new(EdgeKind::MergeIn, from_lane, to_lane, color_id));
    }

    pub fn branch_out(&mut self, from_lane: Lane, to_lane: Lane, color_id: ColorId) {
        self.edges
            .push(Edge::new(EdgeKind::BranchOut, from_lane, to_lane, color_id));
    }

    pub fn build(self) -> Vec<Edge> {
        self.edges
    }
}
