//! Lane registry for the single layout pass
//!
//! Each slot holds the hash of the not-yet-visited commit that owns the lane, or
//! nothing when the lane is free. Slots are never removed, only freed, so lane
//! numbers stay stable for the whole computation. A `Vec<Option<_>>` makes the
//! one-owner-per-lane invariant structural.

use crate::artifacts::objects::commit_hash::CommitHash;
use std::collections::{BTreeSet, HashMap};

/// Column index of a lane
pub type Lane = usize;

#[derive(Debug, Default)]
pub struct LaneRegistry {
    slots: Vec<Option<CommitHash>>,
    reservations: HashMap<CommitHash, Lane>,
    max_lane: Lane,
}

impl LaneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lane currently owned by `hash`, if it is still open
    pub fn reserved_lane(&self, hash: &CommitHash) -> Option<Lane> {
        let lane = *self.reservations.get(hash)?;
        match self.slots.get(lane) {
            Some(Some(owner)) if owner == hash => Some(lane),
            _ => None,
        }
    }

    /// Mark `lane` as owned by `hash`, growing the registry when `lane` is new
    pub fn claim(&mut self, lane: Lane, hash: CommitHash) {
        if lane >= self.slots.len() {
            self.slots.resize(lane + 1, None);
        }
        if let Some(Some(previous)) = self.slots.get(lane)
            && self.reservations.get(previous) == Some(&lane)
        {
            self.reservations.remove(previous);
        }
        self.reservations.insert(hash.clone(), lane);
        self.slots[lane] = Some(hash);
        self.max_lane = self.max_lane.max(lane);
    }

    /// Free `lane`; it may be handed to another branch afterwards
    pub fn release(&mut self, lane: Lane) {
        if let Some(slot) = self.slots.get_mut(lane)
            && let Some(owner) = slot.take()
            && self.reservations.get(&owner) == Some(&lane)
        {
            self.reservations.remove(&owner);
        }
    }

    /// Lowest free lane outside `excluded`, or a brand new lane past the end
    pub fn lowest_free(&self, excluded: &BTreeSet<Lane>) -> Lane {
        self.slots
            .iter()
            .enumerate()
            .find(|(lane, owner)| owner.is_none() && !excluded.contains(lane))
            .map(|(lane, _)| lane)
            .unwrap_or_else(|| excluded_tail(excluded, self.slots.len()))
    }

    /// Open lanes in ascending order with their owners
    pub fn open_lanes(&self) -> impl Iterator<Item = (Lane, &CommitHash)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(lane, owner)| owner.as_ref().map(|owner| (lane, owner)))
    }

    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|owner| owner.is_some()).count()
    }

    /// Highest lane index ever claimed
    pub fn max_lane(&self) -> Lane {
        self.max_lane
    }
}

/// First lane at or past `len` that is not excluded
fn excluded_tail(excluded: &BTreeSet<Lane>, len: usize) -> Lane {
    let mut lane = len;
    while excluded.contains(&lane) {
        lane += 1;
    }
    lane
}
