//! Core types for the reference board and job dashboard.
//!
//! This module defines the persisted document model: reference items placed on
//! a board, the jobs that own them, and the application settings stored next to
//! the jobs in the single JSON document. Field names follow the on-disk camelCase
//! shape so documents written by earlier versions load unchanged.

use crate::constants::STANDALONE_JOB_ID;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Generate a fresh, globally unique id for items and jobs.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// Reference Items
// ============================================================================

/// Media kind of a placed asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    #[default]
    Image,
    Video,
}

impl ReferenceKind {
    /// Classify a MIME essence string (`image/png`, `video/mp4`, ...).
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime.starts_with("video/") {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle in canvas (world) units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ItemRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Width over height. Degenerate rectangles report 1.0.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 && self.width > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// One placed asset on a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    /// Stable for the item's lifetime
    pub id: String,
    /// Always a local path, even for assets that came from the web
    pub path: PathBuf,
    /// Provenance for web-ingested assets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Reserved, not applied at runtime
    #[serde(default)]
    pub rotation: f64,
    /// Stacking order, higher paints on top. Not necessarily contiguous.
    #[serde(default)]
    pub z_index: i64,
}

impl ReferenceItem {
    /// Create an item with a fresh id.
    pub fn new(path: impl Into<PathBuf>, kind: ReferenceKind, rect: ItemRect, z_index: i64) -> Self {
        Self {
            id: generate_id(),
            path: path.into(),
            original_url: None,
            kind,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            rotation: 0.0,
            z_index,
        }
    }

    pub fn with_original_url(mut self, url: impl Into<String>) -> Self {
        self.original_url = Some(url.into());
        self
    }

    pub fn rect(&self) -> ItemRect {
        ItemRect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: ItemRect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    /// Copy of this item under a new id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: generate_id(),
            ..self.clone()
        }
    }
}

// ============================================================================
// Jobs
// ============================================================================

/// The owning document for one board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Keys of reminders that already fired ("day-3", "app-day-0", ...)
    #[serde(default)]
    pub completed_rules: Vec<String>,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_folder: Option<bool>,
    #[serde(default)]
    pub is_completed: bool,
    /// Insertion order. Paint order comes from `z_index`.
    #[serde(default)]
    pub references: Vec<ReferenceItem>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_generated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
}

impl Job {
    /// Create a new job with a fresh id and no references.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(generate_id(), title)
    }

    /// Create an empty job under a known id.
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            deadline: None,
            completed_rules: Vec::new(),
            file_path: None,
            is_folder: None,
            is_completed: false,
            references: Vec::new(),
            created_at: now,
            updated_at: now,
            invoice_generated: None,
            invoice_number: None,
            invoice_date: None,
        }
    }

    /// Board document with no backing job.
    pub fn standalone() -> Self {
        Self::with_id(STANDALONE_JOB_ID, "Standalone Board")
    }

    pub fn is_standalone(&self) -> bool {
        self.id == STANDALONE_JOB_ID
    }

    /// Bump `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn has_fired(&self, rule_key: &str) -> bool {
        self.completed_rules.iter().any(|k| k == rule_key)
    }

    /// Record a fired reminder key. Returns false if it was already present.
    pub fn mark_fired(&mut self, rule_key: impl Into<String>) -> bool {
        let key = rule_key.into();
        if self.has_fired(&key) {
            return false;
        }
        self.completed_rules.push(key);
        true
    }
}

// ============================================================================
// Settings
// ============================================================================

/// UI language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

/// Color theme broadcast to every window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }
}

/// Persisted application settings. Missing fields fall back to defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub is_dark: bool,
    pub webhook_url: String,
    /// Days-before-deadline thresholds that trigger Discord reminders
    pub discord_alert_days: Vec<u32>,
    /// Days-before-deadline thresholds that trigger in-app alerts
    pub in_app_alert_days: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_completed_onboarding: Option<bool>,
    pub language: Language,
    pub notification_hour: u8,
    pub notification_minute: u8,
    /// Invoice settings, kept opaque and written back untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<serde_json::Value>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            is_dark: true,
            webhook_url: String::new(),
            discord_alert_days: vec![1, 0],
            in_app_alert_days: vec![1, 0],
            has_completed_onboarding: None,
            language: Language::En,
            notification_hour: 9,
            notification_minute: 0,
            invoice: None,
        }
    }
}

impl AppSettings {
    pub fn theme(&self) -> Theme {
        Theme::from_dark(self.is_dark)
    }

    pub fn has_webhook(&self) -> bool {
        !self.webhook_url.trim().is_empty()
    }
}

/// The whole persisted document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub settings: AppSettings,
    #[serde(default)]
    pub jobs: Vec<Job>,
}
