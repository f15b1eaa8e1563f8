//! Per-run snapshot history.
//!
//! Every evaluated generation is appended. Every `PRUNE_INTERVAL` generations the
//! history is cut back to the newest few snapshots, which is still enough for the
//! period-2 check to look two generations back.

use std::collections::VecDeque;

use log::debug;

use crate::board::Board;

/// Generations between prunes.
pub const PRUNE_INTERVAL: u64 = 500;

/// Snapshots retained by a prune. Period-2 detection looks two generations
/// back from the latest board, so fewer than three breaks it.
pub const KEEP_AFTER_PRUNE: usize = 3;

/// Ordered board snapshots, oldest first.
///
/// Index `i` is the board after `i` evaluations counted from the first
/// insertion still retained.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Board>,
    prune_interval: u64,
    keep: usize,
}

impl Default for History {
    fn default() -> Self {
        History::new()
    }
}

impl History {
    pub fn new() -> Self {
        History::with_policy(PRUNE_INTERVAL, KEEP_AFTER_PRUNE)
    }

    /// Custom prune policy. `keep` is raised to [`KEEP_AFTER_PRUNE`] when lower;
    /// an `interval` of 0 disables pruning.
    pub fn with_policy(interval: u64, keep: usize) -> Self {
        History {
            snapshots: VecDeque::new(),
            prune_interval: interval,
            keep: keep.max(KEEP_AFTER_PRUNE),
        }
    }

    /// Take ownership of a freshly evaluated board.
    pub fn append(&mut self, board: Board) {
        self.snapshots.push_back(board);
    }

    /// Drop everything but the newest snapshots when `generation` lands on the
    /// prune interval. Returns how many snapshots were dropped.
    pub fn prune(&mut self, generation: u64) -> usize {
        if self.prune_interval == 0
            || generation == 0
            || !generation.is_multiple_of(self.prune_interval)
        {
            return 0;
        }
        let excess = self.snapshots.len().saturating_sub(self.keep);
        self.snapshots.drain(..excess);
        if excess > 0 {
            debug!(
                "pruned {} snapshots at generation {}, {} retained",
                excess,
                generation,
                self.snapshots.len()
            );
        }
        excess
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn latest(&self) -> Option<&Board> {
        self.snapshots.back()
    }

    /// Snapshot `n` generations before the latest (`back(0)` is the latest).
    pub fn back(&self, n: usize) -> Option<&Board> {
        let len = self.snapshots.len();
        if n >= len {
            return None;
        }
        self.snapshots.get(len - 1 - n)
    }

    pub fn get(&self, index: usize) -> Option<&Board> {
        self.snapshots.get(index)
    }

    /// Retained snapshots, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Board> + ExactSizeIterator {
        self.snapshots.iter()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Index of the newest retained snapshot (other than the latest) equal to
    /// `board`, if any.
    ///
    /// This is the general repeat check. It only sees what pruning left behind,
    /// so it can miss cycles longer than the retention window, and each call
    /// costs one board comparison per retained snapshot. The run loop does not
    /// call it.
    pub fn find_repeat(&self, board: &Board) -> Option<usize> {
        let older = self.len().checked_sub(1)?;
        self.iter().take(older).rposition(|snapshot| snapshot == board)
    }
}
