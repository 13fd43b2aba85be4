//! Commit graph data structures and algorithms
//!
//! - `graph`: lane allocation, color identities, edges, layout and viewport
//! - `log`: commit sources feeding the layout (git repository, JSON, memory)
//! - `objects`: commit records
//! - `session`: memoized, last-request-wins layout state per repository

pub mod graph;
pub mod log;
pub mod objects;
pub mod session;
