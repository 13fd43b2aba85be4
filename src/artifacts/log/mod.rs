//! Commit lists for the graph
//!
//! - `source`: the `CommitSource` trait plus in-memory, JSON file and stdin sources
//! - `git_log`: a source that walks a repository's history with libgit2
//!
//! ## Ordering
//!
//! Every source yields commits children first. The repository walk sorts
//! topologically, which holds even when commit timestamps are skewed and plain
//! time ordering does not.

pub mod git_log;
pub mod source;
