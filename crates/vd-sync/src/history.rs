//! Snapshot-based undo/redo history.
//!
//! Full-state snapshots rather than diffs keep every mutation atomic: a
//! restore can never land between two half-applied edits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::conflict::Conflict;
use crate::types::{LoadSchedule, UnifiedCircuitData};

/// The coordinator state captured before every mutation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub circuits: BTreeMap<String, UnifiedCircuitData>,
    pub load_schedules: BTreeMap<String, LoadSchedule>,
    pub conflicts: Vec<Conflict>,
}

/// Classic `{history, index}` pair. `snapshots[..index]` are undoable
/// pasts; anything beyond `index` is the redo tail.
#[derive(Debug, Default)]
pub struct HistoryStack {
    snapshots: Vec<StateSnapshot>,
    index: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-mutation state, truncating any redo tail.
    pub fn record(&mut self, current: StateSnapshot) {
        self.snapshots.truncate(self.index);
        self.snapshots.push(current);
        self.index = self.snapshots.len();
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Step back one snapshot, parking `current` so it can be redone.
    /// No-op at the bottom of the stack.
    pub fn undo(&mut self, current: StateSnapshot) -> Option<StateSnapshot> {
        if !self.can_undo() {
            return None;
        }
        if self.index == self.snapshots.len() {
            self.snapshots.push(current);
        } else {
            self.snapshots[self.index] = current;
        }
        self.index -= 1;
        Some(self.snapshots[self.index].clone())
    }

    /// Step forward one snapshot. No-op at the top of the stack.
    pub fn redo(&mut self, current: StateSnapshot) -> Option<StateSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.snapshots[self.index] = current;
        self.index += 1;
        Some(self.snapshots[self.index].clone())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
