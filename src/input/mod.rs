//! Mouse, scroll and keyboard input handling for the reference board.
//!
//! This module implements all pointer interaction logic for a board window:
//! item selection, dragging, aspect-locked resizing, panning and zooming.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine (`InputState`) to track
//! the current interaction mode. One board handles one gesture at a time.
//!
//! ## Modules
//!
//! - `coords` - Screen/canvas coordinate conversion and the pan/zoom transform
//! - `events` - Toolkit-neutral event structs fed in by the hosting window
//! - `state` - Input state machine enum and helper methods
//! - `mouse_down` - Mouse down handling (selection, drag/resize/pan start)
//! - `mouse_up` - Mouse up handling (finalize gestures, commit history)
//! - `drag` - Mouse move handling (drag, resize, pan operations)
//! - `transform` - Wheel zoom and pan

pub mod coords;
pub mod events;
mod state;
mod mouse_down;
mod mouse_up;
mod drag;
mod transform;

pub use drag::resize_from_snapshot;
pub use state::{GestureOutcome, GestureSnapshot, InputState, ResizeHandle};
