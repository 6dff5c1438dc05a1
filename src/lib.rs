//! RefBoard core: a job-tracking dashboard with per-job infinite reference
//! boards.
//!
//! The crate is headless. A hosting shell feeds toolkit-neutral input events
//! into a [`board::ReferenceBoard`] and drives a [`dashboard::Dashboard`] from
//! its own event loop; the two talk only through a [`sync::EventBus`].
//!
//! ## Modules
//!
//! - `board` - Reference board window: items, selection, history, clipboard
//! - `input` - Pointer/keyboard handling and the canvas transform
//! - `spatial_index` - R-tree hit testing
//! - `sync` - Cross-window messages and the event bus
//! - `dashboard` - Authoritative job list, settings, persistence, reminders
//! - `ingest` - Dropped files and web images to local assets
//! - `storage` - The JSON document on disk
//! - `reminders` - Deadline checks and Discord delivery
//! - `i18n` - English/Japanese phrases
//! - `perf` - Profiling instrumentation

pub mod board;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod i18n;
pub mod ingest;
pub mod input;
pub mod perf;
pub mod reminders;
pub mod spatial_index;
pub mod storage;
pub mod sync;
pub mod types;
