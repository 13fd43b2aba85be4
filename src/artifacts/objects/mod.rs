//! Commit records handed to the layout engine
//!
//! - `commit`: a commit with parents, refs and display metadata
//! - `commit_hash`: the opaque hash newtype used as the commit key

pub mod commit;
pub mod commit_hash;
