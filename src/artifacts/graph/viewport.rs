//! Virtualized viewport over graph rows
//!
//! Row heights are fixed per view mode, so the visible slice of a history is a
//! pure function of the scroll offset and needs no scan of the rows. This runs on
//! every scroll event while the layout itself is only rebuilt when the commit list
//! changes.

use crate::artifacts::graph::lanes::Lane;
use clap::ValueEnum;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Rows rendered above and below the visible area by default
pub const DEFAULT_BUFFER_ROWS: usize = 50;

/// Row density of the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Expanded,
    Compact,
}

impl ViewMode {
    pub fn metrics(self) -> ViewMetrics {
        match self {
            ViewMode::Expanded => ViewMetrics::new(32.0, 20.0, 12.0),
            ViewMode::Compact => ViewMetrics::new(24.0, 14.0, 8.0),
        }
    }
}

/// Pixel sizes a renderer lays the graph out with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct ViewMetrics {
    pub row_height: f64,
    pub column_width: f64,
    pub margin: f64,
}

impl ViewMetrics {
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Width needed to draw lanes `0..=max_lane`
    pub fn graph_width(&self, max_lane: Lane) -> f64 {
        (max_lane as f64 + 1.0) * self.column_width + self.margin
    }
}

/// Inclusive index range of rows to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRange {
    pub first_index: usize,
    pub last_index: usize,
}

impl VisibleRange {
    pub fn contains(&self, index: usize) -> bool {
        (self.first_index..=self.last_index).contains(&index)
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.first_index..=self.last_index
    }
}

/// Rows to render for the given scroll position, padded by `buffer` rows
///
/// Scroll offsets outside the history are clamped; there is no range when there
/// are no rows or the row height is not a positive number.
pub fn visible_range(
    scroll_top: f64,
    container_height: f64,
    row_height: f64,
    row_count: usize,
    buffer: usize,
) -> Option<VisibleRange> {
    if row_count == 0 || !row_height.is_finite() || row_height <= 0.0 {
        return None;
    }

    let scroll_top = non_negative(scroll_top);
    let container_height = non_negative(container_height);
    let last_row = row_count - 1;

    // Float to int casts saturate, so huge offsets land on the last row
    let first_visible = (scroll_top / row_height).floor() as usize;
    let last_visible = ((scroll_top + container_height) / row_height).ceil() as usize;

    let last_index = last_visible.saturating_add(buffer).min(last_row);
    let first_index = first_visible.saturating_sub(buffer).min(last_index);

    Some(VisibleRange::new(first_index, last_index))
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Scroll container showing a graph at fixed row metrics
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct ViewportWindow {
    metrics: ViewMetrics,
    container_height: f64,
    buffer: usize,
}

impl ViewportWindow {
    pub fn for_mode(mode: ViewMode, container_height: f64) -> Self {
        Self::new(mode.metrics(), container_height, DEFAULT_BUFFER_ROWS)
    }

    pub fn visible_range(&self, scroll_top: f64, row_count: usize) -> Option<VisibleRange> {
        visible_range(
            scroll_top,
            self.container_height,
            self.metrics.row_height,
            row_count,
            self.buffer,
        )
    }

    pub fn total_height(&self, row_count: usize) -> f64 {
        row_count as f64 * self.metrics.row_height
    }

    /// Scroll height including the filler below short histories
    ///
    /// Continuation lines from the active lanes are drawn down to this height.
    pub fn extended_height(&self, row_count: usize) -> f64 {
        self.total_height(row_count)
            .max(non_negative(self.container_height))
    }

    pub fn graph_width(&self, max_lane: Lane) -> f64 {
        self.metrics.graph_width(max_lane)
    }
}
