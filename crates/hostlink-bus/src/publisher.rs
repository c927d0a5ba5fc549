//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::message::BusMessage;
use crate::subscriber::{BusFilter, BusSubscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Errors from bus operations.
///
/// The in-memory bus never produces these; networked bus implementations
/// surface connectivity loss through them, and the routing core treats any
/// error at connect time as fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The bus transport cannot be reached.
    #[error("event bus unavailable")]
    Unavailable,
}

/// The shared event bus as seen by a host process.
///
/// Publication is fire-and-forget: delivering to zero subscribers is a
/// success, and a returned error is never retried by callers.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish a message to the bus.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the message.
    async fn publish(&self, message: BusMessage) -> Result<usize, BusError>;

    /// Subscribe to messages accepted by `filter`.
    fn subscribe(&self, filter: BusFilter) -> Result<BusSubscription, BusError>;

    /// Get the total number of messages published.
    fn messages_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer
/// semantics. Suitable for single-process operation and the test suite;
/// multi-machine deployments would use a networked implementation.
pub struct InMemoryEventBus {
    /// Broadcast sender for messages.
    sender: broadcast::Sender<BusMessage>,

    /// Total messages published.
    messages_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            messages_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, message: BusMessage) -> Result<usize, BusError> {
        // Always increment counter (publication was attempted)
        self.messages_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(message) {
            Ok(receiver_count) => {
                debug!(receivers = receiver_count, "message published");
                Ok(receiver_count)
            }
            Err(e) => {
                // No receivers - message is dropped, still a successful publish
                warn!(error = %e, "message dropped (no receivers)");
                Ok(0)
            }
        }
    }

    fn subscribe(&self, filter: BusFilter) -> Result<BusSubscription, BusError> {
        let receiver = self.sender.subscribe();
        debug!(?filter, "new bus subscription created");
        Ok(BusSubscription::new(receiver, filter))
    }

    fn messages_published(&self) -> u64 {
        self.messages_published.load(Ordering::Relaxed)
    }
}
