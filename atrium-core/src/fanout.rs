//! Best-effort broadcast of catalog events to connected viewers.
//!
//! Each subscriber owns a bounded queue. Publishing never waits on a
//! subscriber: a full or closed queue drops that delivery and the publish
//! carries on with the rest. Nothing is buffered for viewers that subscribe
//! later.

use std::{fmt, sync::Arc};

use atrium_model::EntryCreated;
use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use uuid::Uuid;

/// Queue depth per subscriber when none is configured.
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 64;

/// Identifier of one registered viewer.
pub type SubscriberId = Uuid;

/// Outcome of a single publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Subscribers whose queue accepted the event.
    pub delivered: usize,
    /// Subscribers skipped because their queue was full or closed.
    pub dropped: usize,
}

/// Receiving half handed to a viewer.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<EntryCreated>,
}

impl Subscription {
    /// Handle to pass to [`FanOutChannel::unsubscribe`].
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Next event, or `None` once the viewer has been unsubscribed.
    pub async fn recv(&mut self) -> Option<EntryCreated> {
        self.receiver.recv().await
    }

    /// Next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<EntryCreated> {
        self.receiver.try_recv().ok()
    }
}

/// Registry of connected viewers and their queues.
#[derive(Clone)]
pub struct FanOutChannel {
    subscribers: Arc<DashMap<SubscriberId, mpsc::Sender<EntryCreated>>>,
    buffer: usize,
}

impl fmt::Debug for FanOutChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOutChannel")
            .field("subscriber_count", &self.subscribers.len())
            .field("buffer", &self.buffer)
            .finish()
    }
}

impl FanOutChannel {
    /// Channel with [`DEFAULT_SUBSCRIBER_BUFFER`] slots per viewer.
    pub fn new() -> Self {
        Self::with_buffer(DEFAULT_SUBSCRIBER_BUFFER)
    }

    /// Channel with `buffer` slots per viewer. Zero is raised to one.
    pub fn with_buffer(buffer: usize) -> Self {
        Self {
            subscribers: Arc::new(DashMap::new()),
            buffer: buffer.max(1),
        }
    }

    /// Register a viewer. It receives only events published from now on.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = Uuid::now_v7();
        self.subscribers.insert(id, tx);
        debug!(subscriber = %id, total = self.subscribers.len(), "viewer subscribed");
        Subscription { id, receiver: rx }
    }

    /// Stop deliveries to `id`. Unknown or already removed ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        if self.subscribers.remove(&id).is_some() {
            debug!(subscriber = %id, total = self.subscribers.len(), "viewer unsubscribed");
        }
    }

    /// Viewers currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `event` to every current subscriber without waiting.
    pub fn publish(&self, event: &EntryCreated) -> PublishReport {
        let mut report = PublishReport::default();
        let mut closed = Vec::new();

        for subscriber in self.subscribers.iter() {
            match subscriber.value().try_send(event.clone()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    report.dropped += 1;
                    warn!(
                        subscriber = %subscriber.key(),
                        "subscriber queue full, dropping event"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    report.dropped += 1;
                    closed.push(*subscriber.key());
                }
            }
        }

        // Removal happens after iteration; DashMap shards are still read-locked inside the loop.
        for id in closed {
            debug!(subscriber = %id, "pruning disconnected subscriber");
            self.subscribers.remove(&id);
        }

        report
    }
}

impl Default for FanOutChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_model::MediaRef;

    fn event(description: &str) -> EntryCreated {
        EntryCreated {
            id: None,
            media_ref: MediaRef::new(format!("uploads/{description}.jpg")).unwrap(),
            description: description.to_string(),
            category: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn delivers_to_every_current_subscriber() {
        let channel = FanOutChannel::new();
        let mut a = channel.subscribe();
        let mut b = channel.subscribe();

        let report = channel.publish(&event("loft"));
        assert_eq!(report, PublishReport { delivered: 2, dropped: 0 });

        assert_eq!(a.recv().await.unwrap().description, "loft");
        assert_eq!(b.recv().await.unwrap().description, "loft");
    }

    #[tokio::test]
    async fn late_subscribers_get_no_replay() {
        let channel = FanOutChannel::new();
        channel.publish(&event("before"));

        let mut late = channel.subscribe();
        assert!(late.try_recv().is_none());

        channel.publish(&event("after"));
        assert_eq!(late.recv().await.unwrap().description, "after");
    }

    #[tokio::test]
    async fn unsubscribe_is_idempotent_and_stops_delivery() {
        let channel = FanOutChannel::new();
        let mut sub = channel.subscribe();
        let id = sub.id();

        channel.unsubscribe(id);
        channel.unsubscribe(id);
        assert_eq!(channel.subscriber_count(), 0);

        let report = channel.publish(&event("ignored"));
        assert_eq!(report.delivered, 0);
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn slow_subscriber_does_not_block_others() {
        let channel = FanOutChannel::with_buffer(1);
        let _slow = channel.subscribe();
        let mut fast = channel.subscribe();

        assert_eq!(channel.publish(&event("one")).delivered, 2);
        assert_eq!(fast.recv().await.unwrap().description, "one");

        let report = channel.publish(&event("two"));
        assert_eq!(report, PublishReport { delivered: 1, dropped: 1 });
        assert_eq!(fast.recv().await.unwrap().description, "two");
    }

    #[tokio::test]
    async fn dropped_receivers_are_pruned() {
        let channel = FanOutChannel::new();
        let gone = channel.subscribe();
        let mut kept = channel.subscribe();
        drop(gone);

        let report = channel.publish(&event("x"));
        assert_eq!(report, PublishReport { delivered: 1, dropped: 1 });
        assert_eq!(channel.subscriber_count(), 1);
        assert!(kept.recv().await.is_some());
    }

    #[tokio::test]
    async fn preserves_order_for_a_single_publisher() {
        let channel = FanOutChannel::new();
        let mut sub = channel.subscribe();
        for i in 0..10 {
            channel.publish(&event(&i.to_string()));
        }
        for i in 0..10 {
            assert_eq!(sub.recv().await.unwrap().description, i.to_string());
        }
    }
}
