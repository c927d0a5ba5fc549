//! # In-Memory Directory
//!
//! Name → endpoint map with rebind-on-conflict semantics.

use crate::domain::{Endpoint, ProviderName};
use crate::ports::{Directory, DirectoryError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory implementation of the directory service.
#[derive(Default)]
pub struct InMemoryDirectory {
    bindings: RwLock<HashMap<ProviderName, Endpoint>>,

    /// Total resolve calls served; lets tests observe re-resolution after a
    /// cache eviction.
    lookups: AtomicU64,
}

impl InMemoryDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total resolve calls served so far.
    #[must_use]
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of names currently bound.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.read().len()
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn resolve(&self, name: &ProviderName) -> Result<Endpoint, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.bindings
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(name.to_string()))
    }

    async fn bind(&self, name: &ProviderName, endpoint: Endpoint) -> Result<(), DirectoryError> {
        // Rebind on conflict: the newest binding wins, which keeps host
        // restarts transparent.
        self.bindings.write().insert(name.clone(), endpoint);
        Ok(())
    }
}
