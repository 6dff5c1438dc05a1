//! Mouse down event handling - selection, drag/resize/pan initiation.
//!
//! ## Performance Notes
//!
//! Mouse down is a hot path during user interaction. Item hit testing goes
//! through the R-tree spatial index; handle hit testing only visits the
//! selected items.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::coords::Point;
use super::events::{MouseButton, MouseDownEvent};
use super::state::ResizeHandle;
use crate::board::ReferenceBoard;
use crate::profile_scope;
use tracing::trace;

impl ReferenceBoard {
    pub fn handle_mouse_down(&mut self, event: &MouseDownEvent) {
        profile_scope!("handle_mouse_down");

        // A second button pressed mid-gesture does not start another one
        if self.input_state.is_active() {
            return;
        }

        let mouse_pos = event.position;

        match event.button {
            MouseButton::Middle => {
                self.input_state.start_panning(mouse_pos);
                return;
            }
            MouseButton::Right => return,
            MouseButton::Left => {}
        }

        // Handles take priority over the item body they sit on
        if let Some((item_id, handle)) = self.handle_at(mouse_pos) {
            trace!(item = %item_id, handle = handle.as_str(), "resize start");
            self.begin_resize(handle, mouse_pos);
            return;
        }

        if let Some(item_id) = self.item_at(mouse_pos).map(|item| item.id.clone()) {
            if event.modifiers.command() {
                self.toggle_selection(&item_id);
            } else if !self.is_selected(&item_id) {
                self.select_only(&item_id);
            }
            self.begin_drag(mouse_pos);
            return;
        }

        if event.modifiers.pans() {
            self.input_state.start_panning(mouse_pos);
        } else {
            self.clear_selection();
        }
    }

    fn begin_drag(&mut self, mouse_pos: Point) {
        let snapshot = self.selection_snapshot();
        if snapshot.is_empty() {
            return;
        }
        self.input_state.start_dragging(mouse_pos, snapshot);
    }

    fn begin_resize(&mut self, handle: ResizeHandle, mouse_pos: Point) {
        let snapshot = self.selection_snapshot();
        if snapshot.is_empty() {
            return;
        }
        self.input_state.start_resizing(handle, mouse_pos, snapshot);
    }
}
