//! Cross-host integration flows.

pub mod harness;

mod caching;
mod discovery;
mod singleton;
