//! Mouse up event handling - finalize gestures.
//!
//! Panning ends silently. A drag or resize that actually moved something
//! refreshes the spatial index, commits a history snapshot and pushes the
//! document to the dashboard.

use super::events::MouseUpEvent;
use super::state::GestureOutcome;
use crate::board::ReferenceBoard;
use crate::profile_scope;
use tracing::debug;

impl ReferenceBoard {
    pub fn handle_mouse_up(&mut self, _event: &MouseUpEvent) -> GestureOutcome {
        profile_scope!("handle_mouse_up");

        let participants: Vec<String> = self
            .input_state
            .snapshot()
            .map(|snapshot| {
                snapshot
                    .iter()
                    .filter(|(id, initial)| {
                        self.job
                            .get_reference(id)
                            .is_some_and(|item| item.rect() != **initial)
                    })
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default();

        let gesture = self.input_state.name();
        match self.input_state.finish() {
            GestureOutcome::ItemsChanged if participants.is_empty() => {
                // Click without movement
                GestureOutcome::None
            }
            GestureOutcome::ItemsChanged => {
                for id in &participants {
                    self.reindex_item(id);
                }
                debug!(gesture, items = participants.len(), "gesture committed");
                self.commit();
                GestureOutcome::ItemsChanged
            }
            outcome => outcome,
        }
    }
}
