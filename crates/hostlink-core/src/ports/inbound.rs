//! # Driving Ports (Inbound API)
//!
//! The serving side of command routing: the transport delivers every remote
//! `exec_cmd` aimed at this host to its registered [`CommandServer`].

use async_trait::async_trait;

/// A host's command servant.
///
/// The routing core implements this over its provider registry; transports
/// call it for every inbound command.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: calls arrive concurrently from
/// transport worker tasks.
#[async_trait]
pub trait CommandServer: Send + Sync {
    /// Execute `command` with `param` and return the handler's result.
    ///
    /// An unknown command yields an empty string, which the remote caller
    /// reads as command-not-found.
    async fn exec(&self, command: &str, param: &str) -> String;
}
