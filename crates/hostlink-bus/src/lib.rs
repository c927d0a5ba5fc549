//! # Hostlink Bus - Shared Event Bus Contract
//!
//! Every host process publishes to, and consumes from, one shared event bus.
//! This crate defines the wire-level message shape, the `EventBus` contract,
//! and an in-memory reference bus for single-process wiring and tests.
//!
//! ## Message Model
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │   Host A     │                    │   Host B     │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! A [`BusMessage`] carries an ordered filter list plus an opaque body. The
//! bus itself never interprets filters beyond sender exclusion; the routing
//! core classifies messages by the second filter's key (`command`,
//! `offer services`, `want services`).
//!
//! ## Delivery Guarantees
//!
//! At-least-once, no cross-publisher ordering. A lagging subscriber may drop
//! messages; the drop is logged and delivery continues.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod message;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use message::{BusMessage, Filter, FILTER_COMMAND, FILTER_SENDER, OFFER_SERVICES, WANT_SERVICES};
pub use publisher::{BusError, EventBus, InMemoryEventBus};
pub use subscriber::{BusFilter, BusSubscription, SubscriptionError};

/// Maximum messages to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
