//! The dashboard window.
//!
//! Owns the authoritative [`AppData`]: settings and every job. Boards talk to
//! it only through the bus. All persistence happens here, debounced so a
//! burst of edits becomes a single write.

use crate::constants::{DEADLINE_CHECK_INTERVAL, LOCAL_NOTIFICATION_TITLE, SAVE_DEBOUNCE};
use crate::error::{ReminderError, StorageResult};
use crate::i18n;
use crate::perf::{measure_and_log, SLOW_SAVE_MS};
use crate::reminders::{due_reminders, AlertQueue, LocalNotifier, LogNotifier, ReminderChannel, ReminderSink};
use crate::storage::Storage;
use crate::sync::{EventBus, EventFilter, Subscription, SyncMessage, Topic};
use crate::types::{AppData, AppSettings, Job, Language};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Dashboard list tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobFilter {
    Active,
    Completed,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        match self {
            JobFilter::Active => !job.is_completed,
            JobFilter::Completed => job.is_completed,
        }
    }
}

pub struct Dashboard<S, R> {
    data: AppData,
    storage: S,
    sink: R,
    notifier: Box<dyn LocalNotifier>,
    bus: Arc<EventBus>,
    subscription: Subscription,
    alerts: AlertQueue,
    /// Time of the last unsaved change
    dirty_since: Option<Instant>,
    last_deadline_check: Option<Instant>,
}

impl<S: Storage, R: ReminderSink> Dashboard<S, R> {
    /// Load the document and start answering boards.
    pub fn open(storage: S, sink: R, bus: &Arc<EventBus>) -> StorageResult<Self> {
        let data = storage.load()?;
        info!(jobs = data.jobs.len(), "dashboard opened");

        let subscription = bus.subscribe(EventFilter::Topics(vec![Topic::RequestData, Topic::UpdateData]));
        let dashboard = Self {
            data,
            storage,
            sink,
            notifier: Box::new(LogNotifier),
            bus: Arc::clone(bus),
            subscription,
            alerts: AlertQueue::new(),
            dirty_since: None,
            last_deadline_check: None,
        };
        dashboard.publish_appearance();
        Ok(dashboard)
    }

    /// Deliver desktop notifications through `notifier` instead of the log.
    pub fn with_notifier(mut self, notifier: impl LocalNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn settings(&self) -> &AppSettings {
        &self.data.settings
    }

    pub fn jobs(&self) -> &[Job] {
        &self.data.jobs
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.data.jobs.iter().find(|j| j.id == id)
    }

    fn job_mut(&mut self, id: &str) -> Option<&mut Job> {
        self.data.jobs.iter_mut().find(|j| j.id == id)
    }

    pub fn jobs_by_filter(&self, filter: JobFilter) -> Vec<&Job> {
        self.data.jobs.iter().filter(|j| filter.matches(j)).collect()
    }

    pub fn alerts(&self) -> &AlertQueue {
        &self.alerts
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Publish the current theme and language. The bus retains them, so
    /// boards opened later start with these values.
    fn publish_appearance(&self) {
        self.bus.publish(SyncMessage::ThemeChanged {
            theme: self.data.settings.theme(),
        });
        self.bus.publish(SyncMessage::LanguageChanged {
            language: self.data.settings.language,
        });
    }

    fn mark_dirty(&mut self) {
        self.dirty_since = Some(Instant::now());
    }

    // ------------------------------------------------------------------
    // Sync
    // ------------------------------------------------------------------

    /// Answer every queued board message, oldest first.
    pub fn pump_messages(&mut self) -> usize {
        let messages = self.subscription.drain();
        let count = messages.len();
        for message in messages {
            match message {
                SyncMessage::RequestData { job_id } => {
                    self.handle_request(&job_id);
                }
                SyncMessage::UpdateData { job } => {
                    self.handle_update(job);
                }
                other => debug!(topic = %other.topic(), "ignoring message"),
            }
        }
        count
    }

    /// Reply with the requested job on its own topic. Unknown ids get no reply.
    pub fn handle_request(&self, job_id: &str) -> bool {
        match self.job(job_id) {
            Some(job) => {
                self.bus.publish(SyncMessage::Data { job: job.clone() });
                true
            }
            None => {
                debug!(%job_id, "data requested for unknown job");
                false
            }
        }
    }

    /// Take a board's edited job. The board's copy wins, last write wins,
    /// except for `completed_rules`: keys recorded here since the board
    /// loaded its copy are kept, so a reminder never fires twice.
    pub fn handle_update(&mut self, mut job: Job) -> bool {
        let Some(existing) = self.job_mut(&job.id) else {
            debug!(job_id = %job.id, "update for unknown job ignored");
            return false;
        };

        for key in &existing.completed_rules {
            if !job.has_fired(key) {
                job.completed_rules.push(key.clone());
            }
        }
        *existing = job;
        self.mark_dirty();
        true
    }

    // ------------------------------------------------------------------
    // Jobs
    // ------------------------------------------------------------------

    /// Add a job at the top of the list. Blank titles are rejected.
    pub fn add_job(&mut self, title: &str) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let job = Job::new(title);
        let id = job.id.clone();
        self.data.jobs.insert(0, job);
        self.mark_dirty();
        info!(job_id = %id, "job added");
        Some(id)
    }

    pub fn delete_job(&mut self, id: &str) -> bool {
        let before = self.data.jobs.len();
        self.data.jobs.retain(|j| j.id != id);
        let removed = self.data.jobs.len() != before;
        if removed {
            self.mark_dirty();
            info!(job_id = %id, "job deleted");
        }
        removed
    }

    /// Apply `update` to one job and stamp `updatedAt`.
    fn update_job(&mut self, id: &str, update: impl FnOnce(&mut Job)) -> bool {
        let Some(job) = self.job_mut(id) else {
            return false;
        };
        update(job);
        job.touch();
        self.mark_dirty();
        true
    }

    pub fn rename_job(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        self.update_job(id, |job| job.title = title.to_string())
    }

    pub fn set_deadline(&mut self, id: &str, deadline: Option<DateTime<Utc>>) -> bool {
        self.update_job(id, |job| job.deadline = deadline)
    }

    pub fn attach_file(&mut self, id: &str, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        self.update_job(id, |job| job.file_path = Some(path))
    }

    /// Flip a job's completion. Completing it also notifies Discord.
    /// Returns the new state.
    pub fn toggle_complete(&mut self, id: &str) -> Option<bool> {
        let mut completed = false;
        if !self.update_job(id, |job| {
            job.is_completed = !job.is_completed;
            completed = job.is_completed;
        }) {
            return None;
        }

        if completed {
            let title = self.job(id).map(|j| j.title.clone()).unwrap_or_default();
            let message = i18n::job_completed_message(self.data.settings.language, &title);
            self.notify_discord(&message);
        }
        Some(completed)
    }

    /// Open the attached project file with the OS default application.
    pub fn open_job_file(&self, id: &str) -> std::io::Result<()> {
        let path = self
            .job(id)
            .and_then(|j| j.file_path.as_ref())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no file attached"))?;
        open::that(path)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Change settings. Theme and language changes are broadcast.
    pub fn update_settings(&mut self, update: impl FnOnce(&mut AppSettings)) {
        let before = (self.data.settings.theme(), self.data.settings.language);
        update(&mut self.data.settings);
        self.mark_dirty();

        let theme = self.data.settings.theme();
        if theme != before.0 {
            self.bus.publish(SyncMessage::ThemeChanged { theme });
        }
        let language = self.data.settings.language;
        if language != before.1 {
            self.bus.publish(SyncMessage::LanguageChanged { language });
        }
    }

    pub fn set_dark_mode(&mut self, is_dark: bool) {
        self.update_settings(|s| s.is_dark = is_dark);
    }

    pub fn set_language(&mut self, language: Language) {
        self.update_settings(|s| s.language = language);
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Drive debounced saving, deadline checks and alert expiry.
    pub fn tick(&mut self, now: Instant, wall_clock: DateTime<Utc>) {
        self.alerts.expire(now);

        let check_due = self
            .last_deadline_check
            .is_none_or(|last| now.saturating_duration_since(last) >= DEADLINE_CHECK_INTERVAL);
        if check_due {
            self.last_deadline_check = Some(now);
            self.check_deadlines(now, wall_clock);
        }

        let save_due = self
            .dirty_since
            .is_some_and(|since| now.saturating_duration_since(since) >= SAVE_DEBOUNCE);
        if save_due {
            if let Err(err) = self.flush_save() {
                error!(error = %err, "failed to save document");
            }
        }
    }

    /// Fire every due reminder and record it on its job.
    pub fn check_deadlines(&mut self, now: Instant, wall_clock: DateTime<Utc>) -> usize {
        let mut fired = 0;
        for index in 0..self.data.jobs.len() {
            let reminders = due_reminders(&self.data.jobs[index], &self.data.settings, wall_clock);
            for reminder in reminders {
                match reminder.channel {
                    ReminderChannel::Discord => {
                        self.notify_discord(&reminder.message);
                        self.notify_local(&reminder.message);
                    }
                    ReminderChannel::InApp => self.alerts.push(reminder.message, now),
                }
                self.data.jobs[index].mark_fired(reminder.rule_key);
                fired += 1;
            }
        }

        if fired > 0 {
            info!(fired, "deadline reminders fired");
            self.mark_dirty();
        }
        fired
    }

    fn notify_discord(&self, message: &str) {
        match self.sink.send(&self.data.settings.webhook_url, message) {
            Ok(()) => {}
            Err(ReminderError::NoWebhook) => debug!("no webhook configured, skipping discord"),
            Err(err) => warn!(error = %err, "discord notification failed"),
        }
    }

    fn notify_local(&self, message: &str) {
        if let Err(err) = self.notifier.notify(LOCAL_NOTIFICATION_TITLE, message) {
            warn!(error = %err, "local notification failed");
        }
    }

    /// Write the document now. On failure the in-memory state is kept and
    /// the save is retried after the next debounce period.
    pub fn flush_save(&mut self) -> StorageResult<()> {
        let saved = measure_and_log("save_document", SLOW_SAVE_MS, || self.storage.save(&self.data));
        match saved {
            Ok(()) => {
                self.dirty_since = None;
                debug!("document persisted");
                Ok(())
            }
            Err(err) => {
                self.dirty_since = Some(Instant::now());
                Err(err)
            }
        }
    }
}
