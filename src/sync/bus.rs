//! In-process publish/subscribe bus between windows.
//!
//! Every subscriber owns a mailbox; publishing never runs subscriber code, it
//! only enqueues. Each window drains its mailbox on its own event loop, so
//! messages from one publisher arrive in publish order.
//!
//! Theme and language are configuration values rather than events: the bus
//! keeps the latest message for those topics and replays it into every new
//! subscriber's mailbox, so a window opened later still starts current.

use super::messages::{SyncMessage, Topic};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Weak};
use tracing::debug;
use uuid::Uuid;

/// Subscription handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Which topics a subscriber hears.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    Topics(Vec<Topic>),
}

impl EventFilter {
    pub fn matches(&self, topic: &Topic) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Topics(topics) => topics.contains(topic),
        }
    }
}

struct Subscriber {
    filter: EventFilter,
    mailbox: Sender<SyncMessage>,
}

#[derive(Default)]
pub struct EventBus {
    subscribers: RwLock<HashMap<SubscriptionId, Subscriber>>,
    /// Latest message per retained topic
    retained: RwLock<HashMap<Topic, SyncMessage>>,
}

impl EventBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a mailbox for messages matching `filter`. Retained values
    /// matching the filter are queued first. Dropping the returned
    /// [`Subscription`] unsubscribes.
    pub fn subscribe(self: &Arc<Self>, filter: EventFilter) -> Subscription {
        let (mailbox, receiver) = mpsc::channel();
        let id = SubscriptionId::new();

        let mut subscribers = self.subscribers.write();
        let mut replayed = 0;
        for message in self.retained.read().values() {
            if filter.matches(&message.topic()) && mailbox.send(message.clone()).is_ok() {
                replayed += 1;
            }
        }
        subscribers.insert(id, Subscriber { filter, mailbox });
        drop(subscribers);

        debug!(replayed, "Subscription {} added", id);
        Subscription {
            id,
            receiver,
            bus: Arc::downgrade(self),
        }
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.write().remove(&id).is_some();
        if removed {
            debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Enqueue `message` for every matching subscriber. Returns how many
    /// mailboxes received it. Unmatched messages are dropped.
    pub fn publish(&self, message: SyncMessage) -> usize {
        let topic = message.topic();
        if topic.is_retained() {
            self.retained.write().insert(topic.clone(), message.clone());
        }

        let mut delivered = 0;
        let mut closed = Vec::new();

        {
            let subscribers = self.subscribers.read();
            for (id, subscriber) in subscribers.iter() {
                if !subscriber.filter.matches(&topic) {
                    continue;
                }
                if subscriber.mailbox.send(message.clone()).is_ok() {
                    delivered += 1;
                } else {
                    closed.push(*id);
                }
            }
        }

        if !closed.is_empty() {
            let mut subscribers = self.subscribers.write();
            for id in closed {
                subscribers.remove(&id);
            }
        }

        debug!(%topic, delivered, "published");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// A subscriber's mailbox. Unsubscribes when dropped.
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<SyncMessage>,
    bus: Weak<EventBus>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn try_recv(&self) -> Option<SyncMessage> {
        self.receiver.try_recv().ok()
    }

    /// Everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<SyncMessage> {
        self.receiver.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
