//! Cross-window message types.
//!
//! Job data replies travel on a job-scoped topic so a board only ever hears
//! replies for its own job. Everything else is broadcast.

use crate::types::{Job, Language, Theme};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Routing key for bus subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Board asks the dashboard for its job
    RequestData,
    /// Dashboard reply addressed to one job's boards
    JobData(String),
    /// Board pushes its edited job back
    UpdateData,
    ThemeChanged,
    LanguageChanged,
}

impl Topic {
    /// Topics whose latest message is replayed to new subscribers.
    pub fn is_retained(&self) -> bool {
        matches!(self, Topic::ThemeChanged | Topic::LanguageChanged)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::RequestData => write!(f, "request-reference-data"),
            Topic::JobData(job_id) => write!(f, "reference-data-{job_id}"),
            Topic::UpdateData => write!(f, "update-reference-data"),
            Topic::ThemeChanged => write!(f, "theme-changed"),
            Topic::LanguageChanged => write!(f, "language-changed"),
        }
    }
}

/// A message exchanged between the dashboard and board windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SyncMessage {
    RequestData { job_id: String },
    Data { job: Job },
    UpdateData { job: Job },
    ThemeChanged { theme: Theme },
    LanguageChanged { language: Language },
}

impl SyncMessage {
    pub fn topic(&self) -> Topic {
        match self {
            SyncMessage::RequestData { .. } => Topic::RequestData,
            SyncMessage::Data { job } => Topic::JobData(job.id.clone()),
            SyncMessage::UpdateData { .. } => Topic::UpdateData,
            SyncMessage::ThemeChanged { .. } => Topic::ThemeChanged,
            SyncMessage::LanguageChanged { .. } => Topic::LanguageChanged,
        }
    }
}
