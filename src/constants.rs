//! Application-wide constants.
//!
//! Centralizes magic numbers and layout values to make the codebase
//! more maintainable and self-documenting.

use std::time::Duration;

// ============================================================================
// Layout Constants
// ============================================================================

/// Height of the board window's custom title bar in pixels.
/// The canvas origin sits directly below it.
pub const TITLE_BAR_HEIGHT: f64 = 32.0;

/// Side length of the square hit area around a resize handle, in screen pixels
pub const HANDLE_HIT_SIZE: f64 = 12.0;

// ============================================================================
// Item Defaults
// ============================================================================

/// Minimum width/height of a reference item in canvas units
pub const MIN_ITEM_SIZE: f64 = 20.0;

/// Width given to freshly dropped assets, in canvas units
pub const DEFAULT_REFERENCE_WIDTH: f64 = 350.0;

/// Diagonal offset applied per successive paste, in canvas units
pub const PASTE_OFFSET_STEP: f64 = 15.0;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom level
pub const MAX_ZOOM: f64 = 5.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Scale change per wheel delta unit
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

// ============================================================================
// History & Timing
// ============================================================================

/// Maximum undo history states to keep
pub const MAX_HISTORY_STATES: usize = 50;

/// Quiet period after the last change before the dashboard persists
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(1500);

/// How often the dashboard checks deadlines
pub const DEADLINE_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// How long an in-app alert stays visible
pub const IN_APP_ALERT_LIFETIME: Duration = Duration::from_secs(8);

/// Title of the desktop notification sent alongside a Discord reminder
pub const LOCAL_NOTIFICATION_TITLE: &str = "RefBoard Reminder";

// ============================================================================
// Storage
// ============================================================================

/// Directory (under the platform data dir) holding the document and assets
pub const DATA_DIR_NAME: &str = "refboard-pro";

/// File name of the whole-application JSON document
pub const DATA_FILE_NAME: &str = "data.json";

/// Sub-directory for ingested assets
pub const IMAGES_DIR_NAME: &str = "images";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "REFBOARD_DATA_DIR";

/// Job id reserved for a board opened without a backing job
pub const STANDALONE_JOB_ID: &str = "standalone";

// ============================================================================
// Network
// ============================================================================

/// Timeout for remote asset fetches and webhook posts
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on a single fetched asset, in bytes
pub const MAX_REMOTE_ASSET_BYTES: u64 = 64 * 1024 * 1024;

/// Pinterest CDN size buckets, best first
pub const PINIMG_RESOLUTIONS: [&str; 4] = ["originals", "736x", "474x", "236x"];
