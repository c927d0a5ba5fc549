//! # Hostlink Core - Routing & Discovery
//!
//! The routing core lets independent processes ("hosts") exchange two kinds
//! of messages over a shared event bus:
//!
//! - fire-and-forget **events**, delivered to every subscriber of a topic;
//! - **commands**, routed to exactly one remote provider and answered
//!   synchronously (request/response).
//!
//! Hosts do not know each other's network location in advance. A provider
//! advertises which commands it offers; a requester's first call to an
//! unknown command triggers a discovery handshake that resolves, caches and
//! then reuses the provider's address.
//!
//! ## Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **Domain layer:** registries, binding table, reference cache, the
//!   control-message protocol - pure state, no I/O
//! - **Ports layer:** trait contracts for the collaborators (directory
//!   service, call transport, inbound command server)
//! - **Service layer:** [`CommHub`] - the host-facing API wiring domain to
//!   ports, plus the command router and the inbound dispatcher
//! - **Adapters layer:** in-memory directory and loopback transport for
//!   single-process wiring and tests
//!
//! The event bus contract itself lives in the sibling `hostlink-bus` crate.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hostlink_bus::InMemoryEventBus;
//! use hostlink_core::{CommHub, HubConfig, InMemoryDirectory, InMemoryTransport};
//!
//! let bus = Arc::new(InMemoryEventBus::new());
//! let directory = Arc::new(InMemoryDirectory::new());
//! let transport = Arc::new(InMemoryTransport::new());
//!
//! let hub = CommHub::connect(
//!     "sensor",
//!     vec!["readTemperature".into()],
//!     vec![],
//!     bus,
//!     directory,
//!     transport,
//!     HubConfig::default(),
//! )
//! .await?;
//!
//! hub.on_cmd("readTemperature", Arc::new(|_cmd: &str, _param: &str| "21.5".to_string()))
//!     .await;
//! hub.push_event("sensorOnline", "1").await;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Domain re-exports
pub use domain::{
    BindingTable, CommandHandler, Endpoint, EventHandler, HubConfig, ProviderName,
    ProviderRegistry, ReferenceCache, Sid, SubscriptionRegistry,
};

// Port contracts
pub use ports::{CommandServer, CommandTransport, Directory, DirectoryError, TransportError};

// Service
pub use service::{connect_global, CommHub, ConnectError};

// Adapters
pub use adapters::{InMemoryDirectory, InMemoryTransport};
