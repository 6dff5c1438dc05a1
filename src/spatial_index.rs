//! Spatial Index Module
//!
//! Provides R-tree based spatial indexing for hit testing on the board.
//! This reduces hit testing from O(n) to O(log n) for point queries.

use crate::types::{ItemRect, ReferenceItem};
use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;

/// A spatial entry: one item's canvas rectangle.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub item_id: String,
    pub rect: ItemRect,
}

impl SpatialEntry {
    pub fn from_item(item: &ReferenceItem) -> Self {
        Self {
            item_id: item.id.clone(),
            rect: item.rect(),
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let r = &self.rect;
        AABB::from_corners([r.x, r.y], [r.x + r.width, r.y + r.height])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
    }
}

/// Spatial index for reference items using an R-tree.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<String, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spatial index from a set of items.
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a ReferenceItem>,
    {
        let mut index = Self::new();
        index.rebuild(items);
        index
    }

    /// Insert or move an item.
    pub fn insert(&mut self, item: &ReferenceItem) {
        if let Some(old_entry) = self.entries.remove(&item.id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::from_item(item);
        self.tree.insert(entry.clone());
        self.entries.insert(item.id.clone(), entry);
    }

    pub fn remove(&mut self, item_id: &str) -> bool {
        if let Some(entry) = self.entries.remove(item_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Query all items that contain the given point (in canvas coordinates).
    pub fn query_point(&self, x: f64, y: f64) -> Vec<&str> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.rect.contains(x, y))
            .map(|entry| entry.item_id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a ReferenceItem>,
    {
        let entries: Vec<SpatialEntry> = items.into_iter().map(SpatialEntry::from_item).collect();

        self.entries = entries.iter().map(|e| (e.item_id.clone(), e.clone())).collect();
        self.tree = RTree::bulk_load(entries);
    }
}
