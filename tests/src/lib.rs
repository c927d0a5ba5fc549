//! # Hostlink Test Suite
//!
//! Unified test crate containing the cross-host integration flows: several
//! `CommHub` instances wired over one in-memory bus, directory and
//! transport, exercising discovery handshakes, command routing and event
//! fan-out end to end.
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p hostlink-tests
//!
//! # By flow
//! cargo test -p hostlink-tests integration::discovery
//! cargo test -p hostlink-tests integration::events
//! ```

#![allow(dead_code)]

pub mod integration;
