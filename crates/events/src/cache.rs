//! Query-cache invalidation driven by post events.
//!
//! [`CacheInvalidator`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and marks the affected cache keys stale for every
//! received [`PostEvent`]. It runs as a long-lived background task and shuts
//! down when the bus sender is dropped. The actual cache lives outside this
//! process (a hosted query cache in front of the API); this task emits the
//! invalidations it must apply.

use penfolio_core::types::DbId;
use tokio::sync::broadcast;

use crate::bus::PostEvent;

/// Cache key for a single post's cached reads.
pub fn post_key(post_id: DbId) -> String {
    format!("post:{post_id}")
}

/// Cache key for a post's version list.
pub fn versions_key(post_id: DbId) -> String {
    format!("post:{post_id}:versions")
}

/// Cache key for the post collection listing.
pub const POSTS_KEY: &str = "posts";

/// The cache keys made stale by a given event.
///
/// Every mutation invalidates the post itself, its version list, and the
/// collection listing. Deletes invalidate the same set — stale version
/// lists for a deleted post must not be served either.
pub fn stale_keys(event: &PostEvent) -> Vec<String> {
    vec![
        post_key(event.post_id),
        versions_key(event.post_id),
        POSTS_KEY.to_string(),
    ]
}

/// Background service that applies cache invalidations for post events.
pub struct CacheInvalidator;

impl CacheInvalidator {
    /// Run the invalidation loop.
    ///
    /// Subscribes to the event bus via the provided `receiver` and processes
    /// every event it receives. The loop exits when the channel is closed
    /// (i.e. the [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(mut receiver: broadcast::Receiver<PostEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let keys = stale_keys(&event);
                    tracing::info!(
                        event_type = %event.event_type,
                        post_id = event.post_id,
                        keys = ?keys,
                        "Invalidating cached reads"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Cache invalidator lagged, some invalidations were coalesced"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, cache invalidator shutting down");
                    break;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{PostEvent, POST_ROLLED_BACK};

    #[test]
    fn stale_keys_cover_post_versions_and_listing() {
        let event = PostEvent::new(POST_ROLLED_BACK, 12);
        let keys = stale_keys(&event);
        assert_eq!(keys, vec!["post:12", "post:12:versions", "posts"]);
    }

    #[test]
    fn key_helpers_format() {
        assert_eq!(post_key(7), "post:7");
        assert_eq!(versions_key(7), "post:7:versions");
    }
}
