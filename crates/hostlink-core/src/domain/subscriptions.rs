//! # Subscription Registry
//!
//! Maps topics to callback sets and issues/revokes subscription identifiers.
//!
//! Invariant: for a given topic, each distinct callback appears at most once
//! in its callback set. Callback identity is pointer identity of the shared
//! handler (`Arc::ptr_eq`), the closest analogue of the original
//! function-pointer comparison.

use crate::domain::handler::EventHandler;
use crate::domain::types::Sid;
use std::collections::HashMap;
use std::sync::Arc;

/// One issued subscription: which topic, which handler.
struct SubscriptionEntry {
    topic: String,
    handler: Arc<dyn EventHandler>,
}

/// Topic → callback set registry with SID bookkeeping.
#[derive(Default)]
pub struct SubscriptionRegistry {
    /// Callbacks per topic. Delivery order is unspecified.
    topics: HashMap<String, Vec<Arc<dyn EventHandler>>>,

    /// Reverse map from issued SID to its `{topic, callback}` pair.
    entries: HashMap<Sid, SubscriptionEntry>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`.
    ///
    /// Returns the issued SID, or `None` when the topic is empty or the
    /// identical `{topic, handler}` pair is already registered. The `None`
    /// on a duplicate is an idempotence signal, not an error.
    pub fn subscribe(&mut self, topic: &str, handler: Arc<dyn EventHandler>) -> Option<Sid> {
        if topic.is_empty() {
            return None;
        }

        let handlers = self.topics.entry(topic.to_string()).or_default();
        if handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            return None;
        }
        handlers.push(Arc::clone(&handler));

        let sid = Sid::generate();
        self.entries.insert(
            sid.clone(),
            SubscriptionEntry {
                topic: topic.to_string(),
                handler,
            },
        );
        Some(sid)
    }

    /// Remove the subscription issued as `sid`. Unknown SIDs are a no-op.
    pub fn unsubscribe(&mut self, sid: &Sid) {
        let Some(entry) = self.entries.remove(sid) else {
            return;
        };
        if let Some(handlers) = self.topics.get_mut(&entry.topic) {
            handlers.retain(|h| !Arc::ptr_eq(h, &entry.handler));
            if handlers.is_empty() {
                self.topics.remove(&entry.topic);
            }
        }
    }

    /// Snapshot the callbacks registered for `topic`.
    ///
    /// Delivery invokes the snapshot outside the registry lock, so a handler
    /// may subscribe or detach from within a callback without deadlocking.
    #[must_use]
    pub fn handlers_for(&self, topic: &str) -> Vec<Arc<dyn EventHandler>> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    /// Number of callbacks currently registered for `topic`.
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Vec::len)
    }
}
