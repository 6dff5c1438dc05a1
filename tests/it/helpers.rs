//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestBoardBuilder` - Builder pattern for creating test boards with items
//! - Pointer and key shorthands that take canvas coordinates
//! - In-memory stand-ins for storage, remote fetch, Discord delivery and
//!   desktop notifications

use refboard::board::ReferenceBoard;
use refboard::constants::TITLE_BAR_HEIGHT;
use refboard::error::{FetchError, ReminderError, StorageError, StorageResult};
use refboard::input::coords::{point, CanvasState, CoordinateConverter, Point};
use refboard::input::events::{
    Key, Modifiers, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, ScrollWheelEvent,
};
use refboard::input::GestureOutcome;
use refboard::ingest::RemoteFetch;
use refboard::reminders::{LocalNotifier, ReminderSink};
use refboard::storage::Storage;
use refboard::types::{AppData, ItemRect, Job, ReferenceItem, ReferenceKind};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

// ============================================================================
// TestBoardBuilder - Builder pattern for creating test boards
// ============================================================================

/// Builder for creating test boards with items and configuration.
///
/// Items get predictable ids: `item-1`, `item-2`, ...
///
/// # Example
/// ```ignore
/// let board = TestBoardBuilder::new()
///     .with_item(0.0, 0.0, 100.0, 100.0, 1)
///     .with_item(200.0, 0.0, 100.0, 50.0, 2)
///     .selected("item-1")
///     .build();
/// ```
pub struct TestBoardBuilder {
    job: Job,
    canvas: CanvasState,
    selected: Vec<String>,
}

impl Default for TestBoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBoardBuilder {
    pub fn new() -> Self {
        Self {
            job: Job::with_id("job-1", "Test Job"),
            canvas: CanvasState::default(),
            selected: Vec::new(),
        }
    }

    /// Add an image item with the given canvas rectangle and stacking order.
    pub fn with_item(mut self, x: f64, y: f64, width: f64, height: f64, z_index: i64) -> Self {
        let n = self.job.references.len() + 1;
        let mut item = ReferenceItem::new(
            format!("/refs/{n}.png"),
            ReferenceKind::Image,
            ItemRect::new(x, y, width, height),
            z_index,
        );
        item.id = format!("item-{n}");
        self.job.references.push(item);
        self
    }

    pub fn with_canvas(mut self, x: f64, y: f64, scale: f64) -> Self {
        self.canvas = CanvasState::new(x, y, scale);
        self
    }

    pub fn selected(mut self, id: &str) -> Self {
        self.selected.push(id.to_string());
        self
    }

    pub fn build(self) -> ReferenceBoard {
        let mut board = ReferenceBoard::new(self.job);
        board.set_canvas(self.canvas);
        for id in &self.selected {
            board.toggle_selection(id);
        }
        board
    }
}

/// Board with one unselected item per rectangle, z-index in list order.
pub fn board_with_rects(rects: &[(f64, f64, f64, f64)]) -> ReferenceBoard {
    rects
        .iter()
        .enumerate()
        .fold(TestBoardBuilder::new(), |builder, (i, &(x, y, w, h))| {
            builder.with_item(x, y, w, h, i as i64 + 1)
        })
        .build()
}

// ============================================================================
// Geometry and events
// ============================================================================

/// Screen position of a canvas point under the board's current transform.
pub fn screen(board: &ReferenceBoard, x: f64, y: f64) -> Point {
    CoordinateConverter::canvas_to_screen(point(x, y), board.canvas())
}

/// Screen position of a canvas point at the identity transform.
pub fn identity_screen(x: f64, y: f64) -> Point {
    point(x, y + TITLE_BAR_HEIGHT)
}

pub fn rect_of(board: &ReferenceBoard, id: &str) -> ItemRect {
    board
        .job()
        .get_reference(id)
        .map(|item| item.rect())
        .unwrap_or_else(|| panic!("no item {id}"))
}

pub fn assert_rect(actual: ItemRect, expected: (f64, f64, f64, f64)) {
    let (x, y, w, h) = expected;
    let close = |a: f64, b: f64| (a - b).abs() < 1e-6;
    assert!(
        close(actual.x, x) && close(actual.y, y) && close(actual.width, w) && close(actual.height, h),
        "expected ({x}, {y}, {w}, {h}), got {actual:?}"
    );
}

pub fn assert_item_count(board: &ReferenceBoard, expected: usize) {
    assert_eq!(board.references().len(), expected, "Expected {} items", expected);
}

pub fn press(board: &mut ReferenceBoard, pos: Point, modifiers: Modifiers) {
    board.handle_mouse_down(&MouseDownEvent {
        position: pos,
        button: MouseButton::Left,
        modifiers,
    });
}

pub fn press_button(board: &mut ReferenceBoard, pos: Point, button: MouseButton) {
    board.handle_mouse_down(&MouseDownEvent {
        position: pos,
        button,
        modifiers: Modifiers::none(),
    });
}

pub fn move_to(board: &mut ReferenceBoard, pos: Point) {
    board.handle_mouse_move(&MouseMoveEvent { position: pos });
}

pub fn release(board: &mut ReferenceBoard, pos: Point) -> GestureOutcome {
    board.handle_mouse_up(&MouseUpEvent {
        position: pos,
        button: MouseButton::Left,
    })
}

/// Press at `from`, move through `to` and release there.
pub fn drag(board: &mut ReferenceBoard, from: Point, to: Point) -> GestureOutcome {
    press(board, from, Modifiers::none());
    move_to(board, to);
    release(board, to)
}

/// Plain click: press and release without moving.
pub fn click(board: &mut ReferenceBoard, pos: Point, modifiers: Modifiers) -> GestureOutcome {
    press(board, pos, modifiers);
    release(board, pos)
}

pub fn scroll(board: &mut ReferenceBoard, pos: Point, dx: f64, dy: f64, modifiers: Modifiers) -> bool {
    board.handle_scroll(&ScrollWheelEvent {
        position: pos,
        delta: point(dx, dy),
        modifiers,
    })
}

/// Ctrl + character shortcut.
pub fn shortcut(board: &mut ReferenceBoard, c: char) -> bool {
    board.handle_key(Key::Character(c), Modifiers::control())
}

// ============================================================================
// In-memory collaborators
// ============================================================================

/// Storage that keeps the document in memory and counts writes.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    pub document: Rc<RefCell<Option<AppData>>>,
    pub saves: Rc<Cell<usize>>,
    pub fail_saves: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn with_data(data: AppData) -> Self {
        let storage = Self::default();
        *storage.document.borrow_mut() = Some(data);
        storage
    }

    pub fn saved(&self) -> Option<AppData> {
        self.document.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> StorageResult<AppData> {
        Ok(self.document.borrow().clone().unwrap_or_default())
    }

    fn save(&self, data: &AppData) -> StorageResult<()> {
        if self.fail_saves.get() {
            return Err(StorageError::io(
                "memory",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        *self.document.borrow_mut() = Some(data.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Records every Discord post instead of sending it.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub sent: Rc<RefCell<Vec<String>>>,
    pub fail: Rc<Cell<bool>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl ReminderSink for RecordingSink {
    fn send(&self, webhook_url: &str, content: &str) -> Result<(), ReminderError> {
        if webhook_url.trim().is_empty() {
            return Err(ReminderError::NoWebhook);
        }
        if self.fail.get() {
            return Err(ReminderError::Fetch(FetchError::Status {
                url: webhook_url.to_string(),
                status: 500,
            }));
        }
        self.sent.borrow_mut().push(content.to_string());
        Ok(())
    }
}

/// Records desktop notifications as `(title, body)` pairs.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub shown: Rc<RefCell<Vec<(String, String)>>>,
    pub denied: Rc<Cell<bool>>,
}

impl RecordingNotifier {
    pub fn bodies(&self) -> Vec<String> {
        self.shown.borrow().iter().map(|(_, body)| body.clone()).collect()
    }
}

impl LocalNotifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), ReminderError> {
        if self.denied.get() {
            return Err(ReminderError::PermissionDenied);
        }
        self.shown.borrow_mut().push((title.to_string(), body.to_string()));
        Ok(())
    }
}

/// Canned HTTP responses keyed by URL. Unknown URLs answer 404.
#[derive(Default)]
pub struct FakeFetch {
    responses: HashMap<String, Vec<u8>>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: &str, body: Vec<u8>) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    fn lookup(&self, url: &str) -> Result<&Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses.get(url).ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

impl RemoteFetch for FakeFetch {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.lookup(url).cloned()
    }

    fn head(&self, url: &str) -> Result<(), FetchError> {
        self.lookup(url).map(|_| ())
    }
}

/// A real PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height))
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}
