//! Bounded snapshot history for undo/redo.
//!
//! Whole-document snapshots, not diffs. `present` always holds the last
//! committed state, so a live gesture can mutate the working copy freely and
//! still commit the pre-gesture state onto `past`.

use crate::constants::MAX_HISTORY_STATES;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    past: VecDeque<T>,
    present: T,
    future: VecDeque<T>,
    max_states: usize,
}

impl<T: Clone> HistoryManager<T> {
    /// Start a history at `present` with the default depth.
    pub fn new(present: T) -> Self {
        Self::with_limit(present, MAX_HISTORY_STATES)
    }

    pub fn with_limit(present: T, max_states: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(max_states),
            present,
            future: VecDeque::new(),
            max_states,
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Record `next` as the new present. The old present moves onto `past`,
    /// evicting the oldest entry at capacity. Redo is no longer possible.
    pub fn commit(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push_back(previous);
        while self.past.len() > self.max_states {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Step back one snapshot. Returns the restored present.
    pub fn undo(&mut self) -> Option<&T> {
        let previous = self.past.pop_back()?;
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        Some(&self.present)
    }

    /// Step forward one snapshot. Returns the restored present.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.future.pop_front()?;
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_back(current);
        while self.past.len() > self.max_states {
            self.past.pop_front();
        }
        Some(&self.present)
    }

    /// Drop all history and start over at `present`.
    pub fn reset(&mut self, present: T) {
        self.past.clear();
        self.future.clear();
        self.present = present;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}
