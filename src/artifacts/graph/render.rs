//! Text rendering of a graph layout
//!
//! Draws a `git log --graph` style preview, two character cells per lane:
//!
//! ```text
//! * 3f2a9c1 (HEAD, main) Merge branch 'feature'
//! |\
//! | * 77c0d1f Add feature
//! * | a81b0e2 Fix typo
//!  \|
//!   * 0c1d2e3 Initial commit
//!   |
//! ```
//!
//! Lane glyphs take their color from the row's or edge's color identity, so a
//! branch keeps its color when it changes column.

use crate::artifacts::graph::colors::ColorId;
use crate::artifacts::graph::lanes::Lane;
use crate::artifacts::graph::layout::{GraphLayout, GraphRow};
use colored::{Color, Colorize};
use derive_new::new;
use std::collections::HashSet;

pub const PALETTE: [Color; 8] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Red,
    Color::BrightBlue,
    Color::BrightGreen,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct RenderOptions {
    /// Emit ANSI colors
    pub color: bool,
}

type Cell = Option<(char, ColorId)>;

/// Render every row plus one continuation line for the active lanes
pub fn render_graph(layout: &GraphLayout, options: &RenderOptions) -> Vec<String> {
    if layout.is_empty() {
        return Vec::new();
    }

    let width = layout.columns() * 2;
    let mut lines = Vec::with_capacity(layout.len() * 2 + 1);

    for (index, row) in layout.rows.iter().enumerate() {
        let mut cells = vec![None; width];
        for vertical in row.verticals() {
            put(&mut cells, vertical.from_lane * 2, '|', vertical.color_id);
        }
        put(&mut cells, row.lane * 2, '*', row.color_id);

        let mut line = draw(&cells, options);
        line.push(' ');
        line.push_str(&describe(row, options));
        lines.push(line);

        if row.connectors().next().is_some() {
            let below = layout.rows.get(index + 1);
            lines.push(draw(&connector_cells(row, below, layout, width), options));
        }
    }

    let mut continuation = vec![None; width];
    for active in &layout.active_lanes {
        put(&mut continuation, active.lane * 2, '|', active.color_id);
    }
    lines.push(draw(&continuation, options));

    lines
}

fn connector_cells(
    row: &GraphRow,
    below: Option<&GraphRow>,
    layout: &GraphLayout,
    width: usize,
) -> Vec<Cell> {
    let mut cells = vec![None; width];

    for edge in row.connectors() {
        let (from, to) = (edge.from_lane * 2, edge.to_lane * 2);
        if to > from {
            for position in from + 1..to - 1 {
                put(&mut cells, position, '-', edge.color_id);
            }
            put(&mut cells, to - 1, '\\', edge.color_id);
        } else if to < from {
            for position in to + 1..from - 1 {
                put(&mut cells, position, '-', edge.color_id);
            }
            put(&mut cells, from - 1, '/', edge.color_id);
        }
    }

    // Lanes that carry on into the next row, or past the end of the history
    match below {
        Some(next) => {
            let here = occupied_lanes(row);
            for vertical in next.verticals() {
                if here.contains(&vertical.from_lane) {
                    put(&mut cells, vertical.from_lane * 2, '|', vertical.color_id);
                }
            }
            if here.contains(&next.lane) {
                put(&mut cells, next.lane * 2, '|', next.color_id);
            }
        }
        None => {
            for active in &layout.active_lanes {
                put(&mut cells, active.lane * 2, '|', active.color_id);
            }
        }
    }

    cells
}

fn occupied_lanes(row: &GraphRow) -> HashSet<Lane> {
    row.verticals()
        .map(|vertical| vertical.from_lane)
        .chain(std::iter::once(row.lane))
        .collect()
}

fn put(cells: &mut [Cell], position: usize, glyph: char, color_id: ColorId) {
    if let Some(cell) = cells.get_mut(position) {
        *cell = Some((glyph, color_id));
    }
}

fn draw(cells: &[Cell], options: &RenderOptions) -> String {
    let mut line = String::with_capacity(cells.len());
    for cell in cells {
        match cell {
            Some((glyph, color_id)) if options.color => {
                let color = PALETTE[color_id.palette_index(PALETTE.len())];
                line.push_str(&glyph.to_string().color(color).to_string());
            }
            Some((glyph, _)) => line.push(*glyph),
            None => line.push(' '),
        }
    }
    line.trim_end().to_string()
}

fn describe(row: &GraphRow, options: &RenderOptions) -> String {
    let commit = &row.commit;
    let short_hash = commit.hash().to_short_hash();
    let decoration = if commit.refs().is_empty() {
        String::new()
    } else {
        format!(" ({})", commit.refs().join(", "))
    };

    if options.color {
        format!(
            "{}{} {}",
            short_hash.yellow(),
            decoration.green().bold(),
            commit.short_message()
        )
    } else {
        format!("{}{} {}", short_hash, decoration, commit.short_message())
    }
}
