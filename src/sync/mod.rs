//! Cross-window synchronization.
//!
//! The dashboard owns the authoritative job list. Boards request their job,
//! receive it on a job-scoped topic, and push every committed edit back.
//! Theme and language changes are broadcast to everyone.
//!
//! ## Modules
//!
//! - `bus` - The publish/subscribe bus and per-subscriber mailboxes
//! - `messages` - Message and topic types

mod bus;
mod messages;

pub use bus::{EventBus, EventFilter, Subscription, SubscriptionId};
pub use messages::{SyncMessage, Topic};

use crate::types::Job;
use std::sync::Arc;
use tracing::debug;

/// A board window's connection to the bus.
#[derive(Debug)]
pub struct BoardLink {
    bus: Arc<EventBus>,
    subscription: Subscription,
    job_id: String,
}

impl BoardLink {
    /// Subscribe to replies for `job_id` and to broadcasts.
    pub fn connect(bus: &Arc<EventBus>, job_id: impl Into<String>) -> Self {
        let job_id = job_id.into();
        let subscription = bus.subscribe(EventFilter::Topics(vec![
            Topic::JobData(job_id.clone()),
            Topic::ThemeChanged,
            Topic::LanguageChanged,
        ]));
        Self {
            bus: Arc::clone(bus),
            subscription,
            job_id,
        }
    }

    pub fn request_data(&self) {
        debug!(job_id = %self.job_id, "requesting job data");
        self.bus.publish(SyncMessage::RequestData {
            job_id: self.job_id.clone(),
        });
    }

    pub fn push_update(&self, job: &Job) {
        self.bus.publish(SyncMessage::UpdateData { job: job.clone() });
    }

    pub fn drain(&self) -> Vec<SyncMessage> {
        self.subscription.drain()
    }
}
