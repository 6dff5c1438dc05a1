//! Canvas transformations - wheel zoom and wheel pan.

use super::coords::{point, CoordinateConverter};
use super::events::ScrollWheelEvent;
use crate::board::ReferenceBoard;
use crate::constants::WHEEL_ZOOM_SENSITIVITY;
use crate::profile_scope;

impl ReferenceBoard {
    /// Shift + wheel pans, a plain wheel zooms around the pointer.
    /// Returns true if the view changed.
    pub fn handle_scroll(&mut self, event: &ScrollWheelEvent) -> bool {
        profile_scope!("handle_scroll");

        if event.modifiers.shift {
            if event.delta.x == 0.0 && event.delta.y == 0.0 {
                return false;
            }
            self.canvas.pan_by(point(-event.delta.x, -event.delta.y));
            return true;
        }

        let new_scale = self.canvas.scale() - event.delta.y * WHEEL_ZOOM_SENSITIVITY;
        let anchor = CoordinateConverter::screen_to_viewport(event.position);
        self.canvas.zoom_around(new_scale, anchor)
    }
}
