//! # In-Memory Transport
//!
//! Loopback call transport: a registry of endpoint → command server inside
//! one process. Calling an endpoint with no registered server fails as
//! unreachable, which is how tests simulate a dead host.

use crate::domain::Endpoint;
use crate::ports::{CommandServer, CommandTransport, TransportError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory implementation of the call transport.
#[derive(Default)]
pub struct InMemoryTransport {
    servers: RwLock<HashMap<Endpoint, Arc<dyn CommandServer>>>,
}

impl InMemoryTransport {
    /// Create an empty transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear down the server behind `endpoint`, simulating a host that died.
    ///
    /// Returns `false` when the endpoint was not serving.
    pub fn disconnect(&self, endpoint: &Endpoint) -> bool {
        self.servers.write().remove(endpoint).is_some()
    }
}

#[async_trait]
impl CommandTransport for InMemoryTransport {
    fn serve(
        &self,
        host_id: &str,
        server: Arc<dyn CommandServer>,
    ) -> Result<Endpoint, TransportError> {
        let endpoint = Endpoint::new(host_id);
        self.servers.write().insert(endpoint.clone(), server);
        Ok(endpoint)
    }

    async fn call(
        &self,
        endpoint: &Endpoint,
        command: &str,
        param: &str,
    ) -> Result<String, TransportError> {
        let server = self.servers.read().get(endpoint).cloned();
        match server {
            Some(server) => Ok(server.exec(command, param).await),
            None => Err(TransportError::Unreachable(endpoint.address().to_string())),
        }
    }
}
