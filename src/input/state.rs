//! Input state machine - unified state management for board gestures.
//!
//! A single explicit state replaces scattered flags and closures, so a board
//! can only ever be in one gesture at a time.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning          (middle mouse down, or shift + left down on background)
//! Idle -> DraggingItems    (left down on an item)
//! Idle -> Resizing         (left down on a handle of a selected item)
//!
//! Any -> Idle              (mouse up; drag/resize commit history, pan does not)
//! ```

use super::coords::{point, Point};
use crate::types::ItemRect;
use std::collections::HashMap;

/// Geometry of every participating item, captured when a gesture starts.
pub type GestureSnapshot = HashMap<String, ItemRect>;

/// One of the eight handles drawn around a selected item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NorthWest => "nw",
            Self::North => "n",
            Self::NorthEast => "ne",
            Self::East => "e",
            Self::SouthEast => "se",
            Self::South => "s",
            Self::SouthWest => "sw",
            Self::West => "w",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.as_str() == s)
    }

    /// Horizontal movement drives the new size. False only for `n` and `s`,
    /// where vertical movement drives height and width follows.
    pub fn drives_width(&self) -> bool {
        !matches!(self, Self::North | Self::South)
    }

    /// The left edge moves, so the right edge stays anchored.
    pub fn moves_left_edge(&self) -> bool {
        matches!(self, Self::West | Self::SouthWest | Self::NorthWest)
    }

    /// The top edge moves, so the bottom edge stays anchored.
    pub fn moves_top_edge(&self) -> bool {
        matches!(self, Self::North | Self::NorthWest | Self::NorthEast)
    }

    /// Canvas position of this handle on `rect`.
    pub fn position_on(&self, rect: &ItemRect) -> Point {
        let (left, right) = (rect.x, rect.x + rect.width);
        let (top, bottom) = (rect.y, rect.y + rect.height);
        let (mid_x, mid_y) = (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
        match self {
            Self::NorthWest => point(left, top),
            Self::North => point(mid_x, top),
            Self::NorthEast => point(right, top),
            Self::East => point(right, mid_y),
            Self::SouthEast => point(right, bottom),
            Self::South => point(mid_x, bottom),
            Self::SouthWest => point(left, bottom),
            Self::West => point(left, mid_y),
        }
    }
}

/// What a finished gesture changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// No gesture was active
    None,
    /// Only the view transform moved; nothing to record
    ViewChanged,
    /// Item geometry changed; commit history and push a sync update
    ItemsChanged,
}

/// Unified input state for all pointer interactions.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No active gesture
    #[default]
    Idle,

    /// Canvas panning
    Panning {
        /// Last pointer position for incremental deltas
        last_pos: Point,
    },

    /// Moving every selected item
    DraggingItems {
        /// Last pointer position for incremental deltas
        last_pos: Point,
        /// Item geometry at gesture start
        snapshot: GestureSnapshot,
    },

    /// Resizing every selected item from one handle
    Resizing {
        handle: ResizeHandle,
        /// Pointer position at gesture start; deltas are absolute against it
        start_pos: Point,
        /// Item geometry at gesture start
        snapshot: GestureSnapshot,
    },
}

impl InputState {
    /// Returns true if any gesture is active
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_dragging_items(&self) -> bool {
        matches!(self, Self::DraggingItems { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::DraggingItems { .. } => "dragging_items",
            Self::Resizing { .. } => "resizing",
        }
    }

    pub fn start_panning(&mut self, pos: Point) {
        *self = Self::Panning { last_pos: pos };
    }

    pub fn start_dragging(&mut self, pos: Point, snapshot: GestureSnapshot) {
        *self = Self::DraggingItems {
            last_pos: pos,
            snapshot,
        };
    }

    pub fn start_resizing(&mut self, handle: ResizeHandle, pos: Point, snapshot: GestureSnapshot) {
        *self = Self::Resizing {
            handle,
            start_pos: pos,
            snapshot,
        };
    }

    /// Last pointer position for incremental gestures (pan, drag)
    pub fn last_mouse_pos(&self) -> Option<Point> {
        match self {
            Self::Panning { last_pos } | Self::DraggingItems { last_pos, .. } => Some(*last_pos),
            _ => None,
        }
    }

    pub fn update_last_mouse_pos(&mut self, pos: Point) {
        if let Self::Panning { last_pos } | Self::DraggingItems { last_pos, .. } = self {
            *last_pos = pos;
        }
    }

    pub fn active_handle(&self) -> Option<ResizeHandle> {
        match self {
            Self::Resizing { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&GestureSnapshot> {
        match self {
            Self::DraggingItems { snapshot, .. } | Self::Resizing { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// End the current gesture and return to `Idle`.
    pub fn finish(&mut self) -> GestureOutcome {
        match std::mem::take(self) {
            Self::Idle => GestureOutcome::None,
            Self::Panning { .. } => GestureOutcome::ViewChanged,
            Self::DraggingItems { .. } | Self::Resizing { .. } => GestureOutcome::ItemsChanged,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
