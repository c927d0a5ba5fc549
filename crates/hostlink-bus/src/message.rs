//! # Bus Messages
//!
//! Defines the wire shape every host puts on the shared bus: an ordered
//! filter list plus an opaque string body.
//!
//! Filter layout is fixed by the protocol:
//!
//! - position 0: `{"sender", <host id>}` — who published the message
//! - position 1: the type tag — `{"command", <topic>}` for ordinary events,
//!   `{"offer services", <command>}` or `{"want services", <command>}` for
//!   discovery announcements
//!
//! Consumers classify on the second filter's *key*; anything that is not an
//! announcement is an ordinary topic event whose topic is the second filter's
//! *value*.

use serde::{Deserialize, Serialize};

/// Filter key carrying the publishing host's id (position 0).
pub const FILTER_SENDER: &str = "sender";

/// Filter key tagging an ordinary topic event (position 1).
pub const FILTER_COMMAND: &str = "command";

/// Type tag announcing "this host offers the named command".
pub const OFFER_SERVICES: &str = "offer services";

/// Type tag announcing "this host wants a provider for the named command".
pub const WANT_SERVICES: &str = "want services";

/// A single `{key, value}` filter pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Filter key (e.g. `sender`, `command`, `offer services`).
    pub key: String,
    /// Filter value (host id, topic, or command name).
    pub value: String,
}

impl Filter {
    /// Create a filter pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A message as carried by the shared event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusMessage {
    /// Ordered filter pairs; position 0 is the sender tag, position 1 the
    /// type tag.
    pub filters: Vec<Filter>,
    /// Opaque payload, uninterpreted by the bus.
    pub body: String,
}

impl BusMessage {
    /// Build an ordinary topic event: `{sender, command=topic}` filters.
    #[must_use]
    pub fn event(sender: &str, topic: &str, body: &str) -> Self {
        Self {
            filters: vec![
                Filter::new(FILTER_SENDER, sender),
                Filter::new(FILTER_COMMAND, topic),
            ],
            body: body.to_string(),
        }
    }

    /// Build a discovery announcement with the given type tag
    /// ([`OFFER_SERVICES`] or [`WANT_SERVICES`]) for `command`.
    ///
    /// Announcements carry an empty body; all routing information lives in
    /// the filters.
    #[must_use]
    pub fn announcement(sender: &str, type_tag: &str, command: &str) -> Self {
        Self {
            filters: vec![
                Filter::new(FILTER_SENDER, sender),
                Filter::new(type_tag, command),
            ],
            body: String::new(),
        }
    }

    /// Build a message from explicit filter pairs.
    #[must_use]
    pub fn with_filters(filters: Vec<Filter>, body: &str) -> Self {
        Self {
            filters,
            body: body.to_string(),
        }
    }

    /// The publishing host's id, if the message carries a well-formed sender
    /// tag at position 0.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.filters
            .first()
            .filter(|f| f.key == FILTER_SENDER)
            .map(|f| f.value.as_str())
    }

    /// The type tag (position 1), used by consumers to classify the message.
    #[must_use]
    pub fn type_tag(&self) -> Option<&Filter> {
        self.filters.get(1)
    }
}
