//! Coordinate conversion utilities for canvas interactions.
//!
//! Screen space is the board window's client area, origin at the top-left
//! corner of the window (above the title bar). Canvas (world) space is the
//! unscaled, unpanned space item positions are stored in. The canvas origin
//! sits [`TITLE_BAR_HEIGHT`] pixels below the window top.

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, TITLE_BAR_HEIGHT};
use std::ops::{Add, Sub};

/// A 2D point or delta. Units depend on context (screen pixels or canvas units).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point { x, y }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        point(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        point(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Per-window pan/zoom transform. Not persisted and not part of history.
///
/// Fields are private so the scale can only be set through a clamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasState {
    /// Pan offset in screen pixels
    x: f64,
    y: f64,
    /// Zoom factor, always within `[MIN_ZOOM, MAX_ZOOM]`
    scale: f64,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: DEFAULT_ZOOM,
        }
    }
}

impl CanvasState {
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self {
            x,
            y,
            scale: clamp_scale(scale),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Set a new scale keeping the world point under `anchor` fixed.
    ///
    /// `anchor` is in viewport space (screen space minus the title bar), see
    /// [`CoordinateConverter::screen_to_viewport`]. Returns true if the view changed.
    pub fn zoom_around(&mut self, new_scale: f64, anchor: Point) -> bool {
        let new_scale = clamp_scale(new_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return false;
        }

        let ratio = new_scale / self.scale;
        self.x = anchor.x - (anchor.x - self.x) * ratio;
        self.y = anchor.y - (anchor.y - self.y) * ratio;
        self.scale = new_scale;
        true
    }
}

/// Zoom limits applied to any requested scale. Non-finite requests fall
/// back to the default zoom.
fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        DEFAULT_ZOOM
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a screen position to canvas (world) coordinates
    #[inline]
    pub fn screen_to_canvas(screen_pos: Point, canvas: &CanvasState) -> Point {
        point(
            (screen_pos.x - canvas.x) / canvas.scale,
            (screen_pos.y - TITLE_BAR_HEIGHT - canvas.y) / canvas.scale,
        )
    }

    /// Convert a canvas (world) position to screen coordinates
    #[inline]
    pub fn canvas_to_screen(canvas_pos: Point, canvas: &CanvasState) -> Point {
        point(
            canvas_pos.x * canvas.scale + canvas.x,
            canvas_pos.y * canvas.scale + canvas.y + TITLE_BAR_HEIGHT,
        )
    }

    /// Screen position relative to the canvas origin, before pan/zoom
    #[inline]
    pub fn screen_to_viewport(screen_pos: Point) -> Point {
        point(screen_pos.x, screen_pos.y - TITLE_BAR_HEIGHT)
    }

    /// Convert a delta from screen to canvas (for drag operations).
    /// Deltas carry no offset, only scale.
    #[inline]
    pub fn delta_screen_to_canvas(delta: Point, scale: f64) -> Point {
        point(delta.x / scale, delta.y / scale)
    }
}
