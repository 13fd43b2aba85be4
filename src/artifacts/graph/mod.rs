//! Commit graph layout
//!
//! - `lanes`: lane registry for the single pass over the commits
//! - `colors`: branch color identities that survive lane changes
//! - `forbidden`: lanes a new branch head must avoid
//! - `edge`: connector edges of a row
//! - `layout`: the layout engine producing rows, max lane and active lanes
//! - `viewport`: visible row range for virtualized scrolling
//! - `render`: text preview of a layout
//!
//! ## Usage
//!
//! ```rust,ignore
//! let layout = build_graph(&commits);
//! let window = ViewportWindow::for_mode(ViewMode::Expanded, 640.0);
//! if let Some(range) = window.visible_range(scroll_top, layout.len()) {
//!     for row in &layout.rows[range.indices()] {
//!         // draw row.lane, row.edges, ...
//!     }
//! }
//! ```

pub mod colors;
pub mod edge;
pub mod forbidden;
pub mod lanes;
pub mod layout;
pub mod render;
pub mod viewport;
