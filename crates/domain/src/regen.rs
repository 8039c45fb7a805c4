//! Auxiliary regeneration datasets.
//!
//! These move between memory and backend as whole units: no dirty tracking,
//! full read and write each time. Both are assumed small and infrequently
//! persisted.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use townscape_common::TownBlockPos;

/// FIFO of town blocks awaiting terrain regeneration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegenQueue {
    pending: VecDeque<TownBlockPos>,
}

impl RegenQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a position unless it is already pending.
    pub fn push(&mut self, pos: TownBlockPos) -> bool {
        if self.pending.contains(&pos) {
            return false;
        }
        self.pending.push_back(pos);
        true
    }

    pub fn pop(&mut self) -> Option<TownBlockPos> {
        self.pending.pop_front()
    }

    pub fn contains(&self, pos: TownBlockPos) -> bool {
        self.pending.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Captured contents of a single plot, enough for a backend to restore the
/// terrain later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSnapshot {
    pub pos: TownBlockPos,
    /// Cell contents in scan order, as backend-agnostic palette entries.
    pub blocks: Vec<String>,
}

/// Regeneration state: one snapshot per plot awaiting restoration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegenData {
    snapshots: HashMap<TownBlockPos, PlotSnapshot>,
}

impl RegenData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot, replacing any previous one for the same plot.
    pub fn insert(&mut self, snapshot: PlotSnapshot) {
        self.snapshots.insert(snapshot.pos, snapshot);
    }

    pub fn get(&self, pos: TownBlockPos) -> Option<&PlotSnapshot> {
        self.snapshots.get(&pos)
    }

    /// Remove and return a snapshot once its plot has been restored.
    pub fn take(&mut self, pos: TownBlockPos) -> Option<PlotSnapshot> {
        self.snapshots.remove(&pos)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
