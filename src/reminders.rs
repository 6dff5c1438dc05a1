//! Deadline reminders.
//!
//! The dashboard runs [`due_reminders`] periodically. Each configured
//! threshold fires at most once per job; the fired key is recorded in the
//! job's `completed_rules` so it survives restarts. Discord reminders go
//! through a [`ReminderSink`] and are mirrored to a [`LocalNotifier`];
//! in-app reminders land in an [`AlertQueue`].

use crate::constants::{HTTP_TIMEOUT, IN_APP_ALERT_LIFETIME};
use crate::error::{FetchError, ReminderError};
use crate::i18n;
use crate::types::{AppSettings, Job, Language};
use chrono::{DateTime, Local, Utc};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Whole days until `deadline`, rounded down. Negative once it has passed.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_milliseconds().div_euclid(DAY_MS)
}

// ============================================================================
// Reminder evaluation
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReminderChannel {
    Discord,
    InApp,
}

impl ReminderChannel {
    /// `completed_rules` key for a threshold on this channel.
    pub fn rule_key(&self, threshold: u32) -> String {
        match self {
            ReminderChannel::Discord => format!("day-{threshold}"),
            ReminderChannel::InApp => format!("app-day-{threshold}"),
        }
    }
}

/// A reminder that is due and has not fired yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    pub channel: ReminderChannel,
    pub rule_key: String,
    pub message: String,
}

/// Reminders due for `job` at `now`. Completed jobs, jobs without a
/// deadline and thresholds that already fired yield nothing.
pub fn due_reminders(job: &Job, settings: &AppSettings, now: DateTime<Utc>) -> Vec<Reminder> {
    let Some(deadline) = job.deadline else {
        return Vec::new();
    };
    if job.is_completed {
        return Vec::new();
    }

    let diff_days = days_until(deadline, now);
    let channels = [
        (ReminderChannel::Discord, &settings.discord_alert_days),
        (ReminderChannel::InApp, &settings.in_app_alert_days),
    ];

    let mut due = Vec::new();
    for (channel, thresholds) in channels {
        for &threshold in thresholds {
            let rule_key = channel.rule_key(threshold);
            if diff_days > i64::from(threshold) || job.has_fired(&rule_key) {
                continue;
            }
            // Same threshold listed twice fires once
            if due.iter().any(|r: &Reminder| r.rule_key == rule_key) {
                continue;
            }
            due.push(Reminder {
                channel,
                rule_key,
                message: i18n::reminder_message(settings.language, &job.title, threshold, diff_days),
            });
        }
    }

    if !due.is_empty() {
        debug!(job_id = %job.id, diff_days, count = due.len(), "reminders due");
    }
    due
}

// ============================================================================
// Deadline display
// ============================================================================

/// How a deadline is presented on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeadlineStatus {
    NotSet,
    Expired,
    /// Less than a day left
    DueToday,
    /// 1 to 3 days left
    Urgent(i64),
    /// 4 to 7 days left
    Soon(i64),
    Later(DateTime<Utc>),
}

impl DeadlineStatus {
    pub fn of(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(deadline) = deadline else {
            return Self::NotSet;
        };
        if deadline < now {
            return Self::Expired;
        }
        match days_until(deadline, now) {
            0 => Self::DueToday,
            d @ 1..=3 => Self::Urgent(d),
            d @ 4..=7 => Self::Soon(d),
            _ => Self::Later(deadline),
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::Expired | Self::DueToday | Self::Urgent(_))
    }

    pub fn label(&self, language: Language) -> String {
        match self {
            Self::NotSet => i18n::not_set(language).to_string(),
            Self::Expired => format!("⚠️ {}", i18n::expired(language)),
            Self::DueToday => format!("🔥 {}", i18n::due_today(language)),
            Self::Urgent(days) | Self::Soon(days) => i18n::days_left(language, *days),
            Self::Later(deadline) => deadline.with_timezone(&Local).format("%-m/%-d").to_string(),
        }
    }
}

// ============================================================================
// Delivery
// ============================================================================

/// Outbound notification channel.
pub trait ReminderSink {
    fn send(&self, webhook_url: &str, content: &str) -> Result<(), ReminderError>;
}

/// Posts `{"content": ...}` to a Discord webhook.
pub struct DiscordWebhook {
    agent: ureq::Agent,
}

impl DiscordWebhook {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(HTTP_TIMEOUT).build(),
        }
    }
}

impl Default for DiscordWebhook {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderSink for DiscordWebhook {
    fn send(&self, webhook_url: &str, content: &str) -> Result<(), ReminderError> {
        let webhook_url = webhook_url.trim();
        if webhook_url.is_empty() {
            return Err(ReminderError::NoWebhook);
        }
        if content.trim().is_empty() {
            return Ok(());
        }

        self.agent
            .post(webhook_url)
            .send_json(serde_json::json!({ "content": content }))
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => FetchError::Status {
                    url: webhook_url.to_string(),
                    status,
                },
                ureq::Error::Transport(transport) => FetchError::Transport {
                    url: webhook_url.to_string(),
                    message: transport.to_string(),
                },
            })?;
        debug!("discord notification sent");
        Ok(())
    }
}

/// Desktop notification channel. Asking the OS for permission is the
/// backend's job; a refusal comes back as [`ReminderError::PermissionDenied`].
pub trait LocalNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), ReminderError>;
}

/// Writes notifications to the log. Used when no desktop backend is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LocalNotifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), ReminderError> {
        info!(title, body, "local notification");
        Ok(())
    }
}

// ============================================================================
// In-app alerts
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InAppAlert {
    pub message: String,
    pub raised_at: Instant,
}

/// Transient alerts shown on the dashboard, oldest first.
#[derive(Debug, Clone)]
pub struct AlertQueue {
    alerts: VecDeque<InAppAlert>,
    lifetime: Duration,
}

impl Default for AlertQueue {
    fn default() -> Self {
        Self::with_lifetime(IN_APP_ALERT_LIFETIME)
    }
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            alerts: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        self.alerts.push_back(InAppAlert {
            message: message.into(),
            raised_at: now,
        });
    }

    /// Drop alerts older than the lifetime.
    pub fn expire(&mut self, now: Instant) {
        while self
            .alerts
            .front()
            .is_some_and(|a| now.duration_since(a.raised_at) >= self.lifetime)
        {
            self.alerts.pop_front();
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.alerts.iter().map(|a| a.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
