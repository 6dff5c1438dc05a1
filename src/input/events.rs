//! Toolkit-neutral pointer and keyboard events.
//!
//! The hosting window translates its native events into these before handing
//! them to a [`ReferenceBoard`](crate::board::ReferenceBoard). All positions are
//! in screen space (window client area, title bar included).

use super::coords::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    /// Command on macOS, Super elsewhere
    pub platform: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }

    pub fn control() -> Self {
        Self {
            control: true,
            ..Self::default()
        }
    }

    /// Ctrl or Cmd: toggles selection membership and prefixes shortcuts
    #[inline]
    pub fn command(&self) -> bool {
        self.control || self.platform
    }

    /// Shift turns a left-button press on the background into a pan
    #[inline]
    pub fn pans(&self) -> bool {
        self.shift
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseDownEvent {
    pub position: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseMoveEvent {
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseUpEvent {
    pub position: Point,
    pub button: MouseButton,
}

/// Wheel or trackpad scroll. Positive `delta.y` scrolls down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollWheelEvent {
    pub position: Point,
    pub delta: Point,
    pub modifiers: Modifiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Delete,
    Backspace,
}
