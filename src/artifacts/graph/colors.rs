//! Branch color identities
//!
//! Colors belong to branch lineages, not to columns. A hash receives a color the
//! first time the walk references it (as a row or as a parent being reserved) and
//! keeps it for the rest of the computation, so a branch that shifts to another
//! lane is still drawn in the same color.

use crate::artifacts::objects::commit_hash::CommitHash;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque color identity; renderers map it onto a palette
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ColorId(u32);

impl ColorId {
    pub fn new(id: u32) -> Self {
        ColorId(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Position in a palette of `palette_len` colors
    pub fn palette_index(self, palette_len: usize) -> usize {
        if palette_len == 0 {
            return 0;
        }
        self.0 as usize % palette_len
    }
}

impl std::fmt::Display for ColorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct ColorTracker {
    colors: HashMap<CommitHash, ColorId>,
    next_color: u32,
}

impl ColorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash: &CommitHash) -> Option<ColorId> {
        self.colors.get(hash).copied()
    }

    /// Color of `hash`, assigning the next fresh color on first reference
    pub fn color_of(&mut self, hash: &CommitHash) -> ColorId {
        if let Some(color) = self.colors.get(hash) {
            return *color;
        }
        let color = self.fresh();
        self.colors.insert(hash.clone(), color);
        color
    }

    /// Hand `color` down to `hash` unless it already has one
    ///
    /// Returns the color `hash` ends up with.
    pub fn inherit(&mut self, hash: &CommitHash, color: ColorId) -> ColorId {
        *self.colors.entry(hash.clone()).or_insert(color)
    }

    fn fresh(&mut self) -> ColorId {
        let color = ColorId(self.next_color);
        self.next_color += 1;
        color
    }
}
