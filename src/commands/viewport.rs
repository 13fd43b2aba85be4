use crate::areas::repository::Repository;
use crate::artifacts::graph::lanes::Lane;
use crate::artifacts::graph::viewport::{ViewMode, ViewportWindow};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportOptions {
    pub scroll_top: f64,
    pub container_height: f64,
    pub rows: usize,
    pub buffer: usize,
    pub view_mode: ViewMode,
    /// Overrides the view mode's row height
    pub row_height: Option<f64>,
    pub max_lane: Lane,
}

/// Viewport numbers a virtualized list needs for one scroll position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportReport {
    pub first_index: Option<usize>,
    pub last_index: Option<usize>,
    pub total_height: f64,
    pub extended_height: f64,
    pub graph_width: f64,
}

impl ViewportReport {
    pub fn compute(opts: &ViewportOptions) -> Self {
        let mut metrics = opts.view_mode.metrics();
        if let Some(row_height) = opts.row_height {
            metrics = metrics.with_row_height(row_height);
        }
        let window = ViewportWindow::new(metrics, opts.container_height, opts.buffer);
        let range = window.visible_range(opts.scroll_top, opts.rows);

        ViewportReport {
            first_index: range.map(|range| range.first_index),
            last_index: range.map(|range| range.last_index),
            total_height: window.total_height(opts.rows),
            extended_height: window.extended_height(opts.rows),
            graph_width: window.graph_width(opts.max_lane),
        }
    }
}

impl Repository {
    pub fn viewport(&self, opts: &ViewportOptions) -> anyhow::Result<()> {
        let report = ViewportReport::compute(opts);
        writeln!(self.writer(), "{}", serde_json::to_string(&report)?)?;
        Ok(())
    }
}
