//! Per-repository layout state
//!
//! The layout engine itself is synchronous and stateless. Sessions sit at the
//! boundary with the asynchronous commit fetch:
//!
//! - `generation`: request tickets for last-request-wins publishing
//! - `layout_cache`: memoization of the layout on the commit list
//! - `graph_session`: refresh orchestration for one repository view
//!
//! Sessions share nothing with each other, so every open repository can refresh
//! concurrently.

pub mod generation;
pub mod graph_session;
pub mod layout_cache;
