//! # Service Layer
//!
//! Wires the domain registries to the bus, directory and transport ports:
//!
//! - `hub` — the host-facing [`CommHub`] API (connect, events, command
//!   registration)
//! - `router` — the client side of command routing: resolution, the
//!   discovery wait, the reference cache discipline
//! - `dispatch` — the single inbound funnel from the bus into the core

pub mod hub;
mod dispatch;
mod router;

pub use hub::{connect_global, CommHub, ConnectError};
