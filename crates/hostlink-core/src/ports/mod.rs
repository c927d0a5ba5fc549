//! # Ports Layer
//!
//! Trait contracts between the routing core and its collaborators.
//!
//! - `inbound` — what the core offers the outside world (the command server
//!   the transport delivers remote calls to)
//! - `outbound` — what the core requires from the host environment (the
//!   directory service and the call transport)
//!
//! The event bus contract lives in the `hostlink-bus` crate.

pub mod inbound;
pub mod outbound;

pub use inbound::CommandServer;
pub use outbound::{CommandTransport, Directory, DirectoryError, TransportError};
