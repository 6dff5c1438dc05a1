//! The reference board window.
//!
//! A `ReferenceBoard` owns the working copy of one job's references plus all
//! window-local state: the view transform, selection, gesture state, undo
//! history, clipboard and spatial index. Pointer handlers live in
//! [`crate::input`]; this module holds the document operations they and the
//! keyboard shortcuts call into.
//!
//! ## Modules
//!
//! - `store` - Item Store queries on [`Job`]
//! - `history` - Bounded undo/redo snapshots
//! - `clipboard` - Board-local copy/paste buffer

mod clipboard;
mod history;
mod store;

pub use clipboard::Clipboard;
pub use history::HistoryManager;

use crate::constants::{DEFAULT_REFERENCE_WIDTH, HANDLE_HIT_SIZE, MIN_ITEM_SIZE};
use crate::ingest::{AssetStore, DropSource, IngestedAsset, Ingestor, RemoteFetch};
use crate::input::coords::{CanvasState, CoordinateConverter, Point};
use crate::input::events::{Key, Modifiers};
use crate::input::{GestureSnapshot, InputState, ResizeHandle};
use crate::spatial_index::SpatialIndex;
use crate::sync::{BoardLink, EventBus, SyncMessage};
use crate::types::{ItemRect, Job, Language, ReferenceItem, Theme};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ReferenceBoard {
    /// Working copy; may run ahead of `history.present()` during a gesture
    pub(crate) job: Job,
    pub(crate) canvas: CanvasState,
    pub(crate) selected: HashSet<String>,
    pub(crate) input_state: InputState,
    pub(crate) history: HistoryManager<Job>,
    pub(crate) clipboard: Clipboard,
    pub(crate) spatial_index: SpatialIndex,
    link: Option<BoardLink>,
    theme: Theme,
    language: Language,
}

impl ReferenceBoard {
    /// Board over `job` with no bus connection.
    pub fn new(job: Job) -> Self {
        let spatial_index = SpatialIndex::from_items(&job.references);
        Self {
            history: HistoryManager::new(job.clone()),
            job,
            canvas: CanvasState::default(),
            selected: HashSet::new(),
            input_state: InputState::default(),
            clipboard: Clipboard::new(),
            spatial_index,
            link: None,
            theme: Theme::default(),
            language: Language::default(),
        }
    }

    /// Open a board window for `job_id` (standalone when `None`) and ask
    /// the dashboard for its data. The current theme and language are
    /// already queued and apply on the first [`Self::pump_messages`].
    pub fn open(job_id: Option<&str>, title: Option<&str>, bus: &Arc<EventBus>) -> Self {
        let job = match job_id {
            Some(id) => Job::with_id(id, title.unwrap_or_default()),
            None => Job::standalone(),
        };

        let link = BoardLink::connect(bus, job.id.clone());
        if !job.is_standalone() {
            link.request_data();
        }
        info!(job_id = %job.id, "board opened");

        let mut board = Self::new(job);
        board.link = Some(link);
        board
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn job(&self) -> &Job {
        &self.job
    }

    pub fn references(&self) -> &[ReferenceItem] {
        &self.job.references
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    pub fn set_canvas(&mut self, canvas: CanvasState) {
        self.canvas = canvas;
    }

    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    pub fn history(&self) -> &HistoryManager<Job> {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selected_ids(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn select_only(&mut self, id: &str) {
        self.selected.clear();
        self.selected.insert(id.to_string());
    }

    pub fn toggle_selection(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected items in board order.
    pub fn selected_items(&self) -> impl Iterator<Item = &ReferenceItem> {
        self.job.references.iter().filter(|r| self.selected.contains(&r.id))
    }

    pub(crate) fn selection_snapshot(&self) -> GestureSnapshot {
        self.selected_items().map(|r| (r.id.clone(), r.rect())).collect()
    }

    fn prune_selection(&mut self) {
        let job = &self.job;
        self.selected.retain(|id| job.get_reference(id).is_some());
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Topmost item under a screen position.
    pub fn item_at(&self, screen_pos: Point) -> Option<&ReferenceItem> {
        let world = CoordinateConverter::screen_to_canvas(screen_pos, &self.canvas);
        let hits: HashSet<&str> = self.spatial_index.query_point(world.x, world.y).into_iter().collect();
        if hits.is_empty() {
            return None;
        }

        self.job
            .references
            .iter()
            .enumerate()
            .filter(|(_, r)| hits.contains(r.id.as_str()))
            .max_by_key(|(index, r)| (r.z_index, *index))
            .map(|(_, r)| r)
    }

    /// Resize handle of a selected item under a screen position. Topmost
    /// item wins when handles overlap.
    pub fn handle_at(&self, screen_pos: Point) -> Option<(String, ResizeHandle)> {
        let half = HANDLE_HIT_SIZE / 2.0;
        self.job
            .references_by_paint_order()
            .into_iter()
            .rev()
            .filter(|r| self.selected.contains(&r.id))
            .find_map(|item| {
                let rect = item.rect();
                ResizeHandle::ALL.into_iter().find_map(|handle| {
                    let at = CoordinateConverter::canvas_to_screen(handle.position_on(&rect), &self.canvas);
                    let hit = (screen_pos.x - at.x).abs() <= half && (screen_pos.y - at.y).abs() <= half;
                    hit.then(|| (item.id.clone(), handle))
                })
            })
    }

    pub(crate) fn reindex_item(&mut self, id: &str) {
        match self.job.get_reference(id) {
            Some(item) => self.spatial_index.insert(item),
            None => {
                self.spatial_index.remove(id);
            }
        }
    }

    fn rebuild_spatial_index(&mut self) {
        self.spatial_index.rebuild(&self.job.references);
    }

    // ------------------------------------------------------------------
    // Document operations
    // ------------------------------------------------------------------

    /// Record the working copy as a new history entry and push it to the
    /// dashboard. The previous committed state becomes undoable.
    pub fn commit(&mut self) {
        self.job.touch();
        self.history.commit(self.job.clone());
        self.publish_update();
    }

    fn publish_update(&self) {
        if let Some(link) = &self.link {
            link.push_update(&self.job);
        }
    }

    /// Swap in a document restored from history.
    fn restore(&mut self, job: Job) {
        self.job = job;
        self.prune_selection();
        self.rebuild_spatial_index();
        self.publish_update();
    }

    pub fn undo(&mut self) -> bool {
        if self.input_state.is_active() {
            return false;
        }
        let Some(previous) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(previous);
        debug!(past = self.history.past_len(), "undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.input_state.is_active() {
            return false;
        }
        let Some(next) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(next);
        debug!(future = self.history.future_len(), "redo");
        true
    }

    /// Copy the selection into the board clipboard.
    pub fn copy(&mut self) -> bool {
        let selected: Vec<&ReferenceItem> = self.job.references.iter().filter(|r| self.selected.contains(&r.id)).collect();
        self.clipboard.copy(selected)
    }

    /// Paste the clipboard above everything else and select the new items.
    pub fn paste(&mut self) -> Vec<String> {
        let pasted = self.clipboard.paste(self.job.next_z_index());
        if pasted.is_empty() {
            return Vec::new();
        }

        let ids: Vec<String> = pasted.iter().map(|r| r.id.clone()).collect();
        for item in pasted {
            self.spatial_index.insert(&item);
            self.job.add_reference(item);
        }
        self.selected = ids.iter().cloned().collect();
        self.commit();
        ids
    }

    /// Remove every selected item.
    pub fn delete_selected(&mut self) -> usize {
        if self.selected.is_empty() {
            return 0;
        }

        let removed = self.job.remove_references(&self.selected);
        for id in &self.selected {
            self.spatial_index.remove(id);
        }
        self.selected.clear();
        if removed > 0 {
            self.commit();
        }
        removed
    }

    /// Keyboard shortcuts. Returns true if the key was handled.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        match key {
            Key::Delete | Key::Backspace => self.delete_selected() > 0,
            Key::Character(c) if modifiers.command() => match c.to_ascii_lowercase() {
                'z' if modifiers.shift => self.redo(),
                'z' => self.undo(),
                'y' => self.redo(),
                'c' => self.copy(),
                'v' => !self.paste().is_empty(),
                _ => false,
            },
            Key::Character(_) => false,
        }
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Place ingested assets centered on a screen drop point. Returns the
    /// new item ids. The whole batch is one history entry.
    pub fn place_assets(&mut self, assets: Vec<IngestedAsset>, drop_pos: Point) -> Vec<String> {
        if assets.is_empty() {
            return Vec::new();
        }

        let center = CoordinateConverter::screen_to_canvas(drop_pos, &self.canvas);
        let mut z_index = self.job.next_z_index();
        let mut ids = Vec::with_capacity(assets.len());

        for asset in assets {
            let (width, height) = placement_size(asset.aspect_ratio);
            let rect = ItemRect::new(center.x - width / 2.0, center.y - height / 2.0, width, height);

            let mut item = ReferenceItem::new(asset.path, asset.kind, rect, z_index);
            item.original_url = asset.original_url;
            z_index += 1;

            self.spatial_index.insert(&item);
            ids.push(item.id.clone());
            self.job.add_reference(item);
        }

        info!(count = ids.len(), "placed dropped assets");
        self.commit();
        ids
    }

    /// Ingest a drop and place whatever succeeded.
    pub fn handle_drop<F, S>(&mut self, ingestor: &Ingestor<F, S>, source: &DropSource, drop_pos: Point) -> Vec<String>
    where
        F: RemoteFetch,
        S: AssetStore,
    {
        let assets = ingestor.ingest(source);
        self.place_assets(assets, drop_pos)
    }

    // ------------------------------------------------------------------
    // Sync
    // ------------------------------------------------------------------

    /// Process everything queued on the bus, oldest first. Returns the
    /// number of messages handled.
    pub fn pump_messages(&mut self) -> usize {
        let messages = match &self.link {
            Some(link) => link.drain(),
            None => return 0,
        };

        let count = messages.len();
        for message in messages {
            match message {
                SyncMessage::Data { job } => self.load_job(job),
                SyncMessage::ThemeChanged { theme } => self.theme = theme,
                SyncMessage::LanguageChanged { language } => self.language = language,
                other => debug!(topic = %other.topic(), "ignoring message"),
            }
        }
        count
    }

    /// Replace the working copy with the dashboard's version.
    fn load_job(&mut self, job: Job) {
        if job.id != self.job.id {
            warn!(expected = %self.job.id, got = %job.id, "job data for another board");
            return;
        }

        debug!(job_id = %job.id, references = job.references.len(), "job data loaded");
        self.input_state.reset();
        self.history.reset(job.clone());
        self.job = job;
        self.prune_selection();
        self.rebuild_spatial_index();
    }
}

/// Size of a newly placed asset: the default width, grown when needed so
/// the derived height is not under [`MIN_ITEM_SIZE`].
fn placement_size(aspect_ratio: f64) -> (f64, f64) {
    let aspect = if aspect_ratio.is_finite() && aspect_ratio > 0.0 { aspect_ratio } else { 1.0 };
    let width = DEFAULT_REFERENCE_WIDTH.max(MIN_ITEM_SIZE * aspect);
    (width, width / aspect)
}
