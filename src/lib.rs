//! Commit graph layout for `git log --graph` style history views
//!
//! The crate turns an ordered commit list (children before parents) into lane
//! assignments, persistent branch colors and per-row connector edges, and offers a
//! constant-time viewport model for virtualized scrolling.
//!
//! - `areas`: repository handle and output plumbing
//! - `artifacts`: commit objects, the layout engine, commit sources and sessions
//! - `commands`: CLI operations built on top of the artifacts

pub mod areas;
pub mod artifacts;
pub mod commands;

use clap::ValueEnum;

/// When to colorize the text graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}
