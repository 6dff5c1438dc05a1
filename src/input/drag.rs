//! Drag operations - panning, item dragging, aspect-locked resizing.
//!
//! ## Performance Notes
//!
//! Mouse move is called very frequently during a gesture. Key points:
//! - Early exit for the idle state
//! - Drag applies incremental deltas; resize recomputes from the snapshot,
//!   so rounding never accumulates
//! - The spatial index is only refreshed on mouse up
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::coords::CoordinateConverter;
use super::events::MouseMoveEvent;
use super::state::{InputState, ResizeHandle};
use crate::board::ReferenceBoard;
use crate::constants::MIN_ITEM_SIZE;
use crate::profile_scope;
use crate::types::ItemRect;

impl ReferenceBoard {
    pub fn handle_mouse_move(&mut self, event: &MouseMoveEvent) {
        profile_scope!("handle_mouse_move");

        let mouse_pos = event.position;

        match &self.input_state {
            InputState::Idle => {}

            InputState::Panning { last_pos } => {
                let delta = mouse_pos - *last_pos;
                self.canvas.pan_by(delta);
                self.input_state.update_last_mouse_pos(mouse_pos);
            }

            InputState::DraggingItems { last_pos, snapshot } => {
                let delta = CoordinateConverter::delta_screen_to_canvas(mouse_pos - *last_pos, self.canvas.scale());
                for id in snapshot.keys() {
                    if let Some(item) = self.job.get_reference_mut(id) {
                        item.x += delta.x;
                        item.y += delta.y;
                    }
                }
                self.input_state.update_last_mouse_pos(mouse_pos);
            }

            InputState::Resizing {
                handle,
                start_pos,
                snapshot,
            } => {
                let delta = CoordinateConverter::delta_screen_to_canvas(mouse_pos - *start_pos, self.canvas.scale());
                for (id, initial) in snapshot {
                    if let Some(item) = self.job.get_reference_mut(id) {
                        item.set_rect(resize_from_snapshot(*handle, initial, delta.x, delta.y));
                    }
                }
            }
        }
    }
}

/// New geometry for an item resized from `handle` by a canvas-space delta
/// measured from the gesture start.
///
/// The aspect ratio of `initial` is preserved. Horizontal movement drives the
/// size for every handle except `n`/`s`. The edge opposite the handle stays
/// put. Neither side ever drops below [`MIN_ITEM_SIZE`].
pub fn resize_from_snapshot(handle: ResizeHandle, initial: &ItemRect, dx: f64, dy: f64) -> ItemRect {
    let aspect = initial.aspect_ratio();

    let (width, height) = if handle.drives_width() {
        let raw = if handle.moves_left_edge() {
            initial.width - dx
        } else {
            initial.width + dx
        };
        // Width bound that also keeps the derived height at the minimum
        let width = raw.max(MIN_ITEM_SIZE).max(MIN_ITEM_SIZE * aspect);
        (width, width / aspect)
    } else {
        let raw = if handle.moves_top_edge() {
            initial.height - dy
        } else {
            initial.height + dy
        };
        let height = raw.max(MIN_ITEM_SIZE).max(MIN_ITEM_SIZE / aspect);
        (height * aspect, height)
    };

    let x = if handle.moves_left_edge() {
        initial.x + (initial.width - width)
    } else {
        initial.x
    };
    let y = if handle.moves_top_edge() {
        initial.y + (initial.height - height)
    } else {
        initial.y
    };

    ItemRect::new(x, y, width, height)
}
