//! Item store operations on a job's reference list.
//!
//! `references` keeps insertion order. Paint order is ascending `z_index`,
//! ties broken by insertion order.

use crate::types::{Job, ReferenceItem};
use std::collections::HashSet;

impl Job {
    pub fn get_reference(&self, id: &str) -> Option<&ReferenceItem> {
        self.references.iter().find(|r| r.id == id)
    }

    pub fn get_reference_mut(&mut self, id: &str) -> Option<&mut ReferenceItem> {
        self.references.iter_mut().find(|r| r.id == id)
    }

    pub fn add_reference(&mut self, item: ReferenceItem) {
        self.references.push(item);
    }

    /// Remove every item whose id is in `ids`. Returns how many were removed.
    pub fn remove_references(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.references.len();
        self.references.retain(|r| !ids.contains(&r.id));
        before - self.references.len()
    }

    /// Highest z-index in use, `None` for an empty board.
    pub fn max_z_index(&self) -> Option<i64> {
        self.references.iter().map(|r| r.z_index).max()
    }

    /// z-index that stacks above everything currently on the board.
    pub fn next_z_index(&self) -> i64 {
        self.max_z_index().unwrap_or(0).max(0) + 1
    }

    /// Items bottom to top.
    pub fn references_by_paint_order(&self) -> Vec<&ReferenceItem> {
        let mut ordered: Vec<&ReferenceItem> = self.references.iter().collect();
        // Stable sort keeps insertion order among equal z
        ordered.sort_by_key(|r| r.z_index);
        ordered
    }
}
