//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`PostEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use penfolio_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event type names
// ---------------------------------------------------------------------------

pub const POST_CREATED: &str = "post.created";
pub const POST_UPDATED: &str = "post.updated";
pub const POST_ROLLED_BACK: &str = "post.rolled_back";
pub const POST_DELETED: &str = "post.deleted";

// ---------------------------------------------------------------------------
// PostEvent
// ---------------------------------------------------------------------------

/// A mutation event for a post.
///
/// Constructed via [`PostEvent::new`] and enriched with the builder methods
/// [`with_actor`](PostEvent::with_actor) and
/// [`with_payload`](PostEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEvent {
    /// Dot-separated event name, e.g. `"post.rolled_back"`.
    pub event_type: String,

    /// The mutated post's database id.
    pub post_id: DbId,

    /// Optional id of the user that triggered the event.
    pub actor_user_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data
    /// (e.g. the new version number).
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl PostEvent {
    /// Create a new event for a post with all optional fields empty.
    pub fn new(event_type: impl Into<String>, post_id: DbId) -> Self {
        Self {
            event_type: event_type.into(),
            post_id,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: Option<DbId>) -> Self {
        self.actor_user_id = user_id;
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`PostEvent`].
pub struct EventBus {
    sender: broadcast::Sender<PostEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: PostEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<PostEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = PostEvent::new(POST_ROLLED_BACK, 42)
            .with_actor(Some(7))
            .with_payload(serde_json::json!({"version": 3}));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, POST_ROLLED_BACK);
        assert_eq!(received.post_id, 42);
        assert_eq!(received.actor_user_id, Some(7));
        assert_eq!(received.payload["version"], 3);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(PostEvent::new(POST_UPDATED, 1));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.event_type, POST_UPDATED);
        assert_eq!(e2.event_type, POST_UPDATED);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(PostEvent::new(POST_DELETED, 9));
    }

    #[test]
    fn new_event_has_empty_optional_fields() {
        let event = PostEvent::new(POST_CREATED, 5);
        assert_eq!(event.event_type, POST_CREATED);
        assert_eq!(event.post_id, 5);
        assert!(event.actor_user_id.is_none());
        assert!(event.payload.is_object());
    }
}
