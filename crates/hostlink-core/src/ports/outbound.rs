//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces the routing core **requires** the host
//! environment to implement: the directory service for name → endpoint
//! resolution and the point-to-point call transport.

use crate::domain::types::{Endpoint, ProviderName};
use crate::ports::inbound::CommandServer;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors from directory operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The name has no binding.
    #[error("name not bound in directory: {0}")]
    NotFound(String),

    /// The directory service cannot be reached.
    #[error("directory service unavailable")]
    Unavailable,
}

/// Errors from transport operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint does not answer; the core treats this as a stale
    /// reference and evicts it.
    #[error("provider endpoint unreachable: {0}")]
    Unreachable(String),

    /// The call reached the endpoint but failed in transit.
    #[error("remote call failed: {0}")]
    CallFailed(String),
}

/// Name → endpoint resolution with idempotent binding.
///
/// Hosts are named by the fixed two-level [`ProviderName`] scheme. `bind`
/// replaces an existing binding (rebind on conflict), which keeps restarts
/// of a host transparent to its peers.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolve `name` to the endpoint bound under it.
    async fn resolve(&self, name: &ProviderName) -> Result<Endpoint, DirectoryError>;

    /// Bind `endpoint` under `name`, replacing any previous binding.
    async fn bind(&self, name: &ProviderName, endpoint: Endpoint) -> Result<(), DirectoryError>;
}

/// Point-to-point synchronous command calls between hosts.
#[async_trait]
pub trait CommandTransport: Send + Sync {
    /// Activate `server` as `host_id`'s command servant and return the
    /// endpoint under which peers can reach it.
    ///
    /// The core binds the returned endpoint into the directory; the
    /// transport keeps serving until the process exits.
    fn serve(
        &self,
        host_id: &str,
        server: Arc<dyn CommandServer>,
    ) -> Result<Endpoint, TransportError>;

    /// Call `command` with `param` on the host behind `endpoint`.
    ///
    /// Any transport error means "provider unreachable" to the router.
    async fn call(
        &self,
        endpoint: &Endpoint,
        command: &str,
        param: &str,
    ) -> Result<String, TransportError>;
}
