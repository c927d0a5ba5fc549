//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::message::BusMessage;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("event bus closed")]
    Closed,
}

/// Bus-side acceptance filter for a subscription.
///
/// The bus never interprets message filters semantically; the only policy it
/// applies is sender exclusion, so a host does not consume its own
/// publications. All other classification happens in the routing core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusFilter {
    /// Messages whose sender tag equals this host id are skipped.
    pub exclude_sender: Option<String>,
}

impl BusFilter {
    /// Accept every message.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Accept every message except those published by `host_id`.
    #[must_use]
    pub fn exclude_sender(host_id: &str) -> Self {
        Self {
            exclude_sender: Some(host_id.to_string()),
        }
    }

    /// Whether `message` passes this filter.
    #[must_use]
    pub fn matches(&self, message: &BusMessage) -> bool {
        match &self.exclude_sender {
            Some(own) => message.sender() != Some(own.as_str()),
            None => true,
        }
    }
}

/// A subscription handle for receiving bus messages.
pub struct BusSubscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<BusMessage>,

    /// Filter for this subscription.
    filter: BusFilter,
}

impl BusSubscription {
    /// Create a new subscription.
    pub(crate) fn new(receiver: broadcast::Receiver<BusMessage>, filter: BusFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next message that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(message)` - The next matching message
    /// - `None` - The channel was closed (bus dropped)
    pub async fn recv(&mut self) -> Option<BusMessage> {
        loop {
            let message = match self.receiver.recv().await {
                Ok(m) => m,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "subscriber lagged, some messages dropped");
                    continue;
                }
            };

            if self.filter.matches(&message) {
                return Some(message);
            }
            // Message doesn't match filter, continue waiting
        }
    }

    /// Try to receive the next message without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))` - A message was available and matched
    /// - `Ok(None)` - No message available (would block)
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<BusMessage>, SubscriptionError> {
        loop {
            let message = match self.receiver.try_recv() {
                Ok(m) => m,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&message) {
                return Ok(Some(message));
            }
            // Message doesn't match filter, try again
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &BusFilter {
        &self.filter
    }
}
