//! # Adapters Layer
//!
//! In-memory reference implementations of the outbound ports, for
//! single-process wiring and the test suites. Networked directory and
//! transport implementations live outside this crate.

pub mod directory;
pub mod transport;

pub use directory::InMemoryDirectory;
pub use transport::InMemoryTransport;
