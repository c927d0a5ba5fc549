//! # Binding Table & Reference Cache
//!
//! Two small maps the command router lives on:
//!
//! - the **binding table** records which host currently provides each
//!   command (at most one provider per command, later announcements
//!   overwrite);
//! - the **reference cache** keeps resolved endpoints per provider host,
//!   populated on first successful call and evicted eagerly on any call
//!   failure.

use crate::domain::types::Endpoint;
use std::collections::HashMap;

/// Command → provider host id. Bindings never expire on their own.
#[derive(Debug, Default)]
pub struct BindingTable {
    bindings: HashMap<String, String>,
}

impl BindingTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `provider` as the provider of `command`, replacing any
    /// previous binding.
    pub fn bind(&mut self, command: &str, provider: &str) {
        self.bindings
            .insert(command.to_string(), provider.to_string());
    }

    /// The host currently bound as provider of `command`.
    #[must_use]
    pub fn provider_of(&self, command: &str) -> Option<&str> {
        self.bindings.get(command).map(String::as_str)
    }
}

/// Provider host id → resolved endpoint.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    references: HashMap<String, Endpoint>,
}

impl ReferenceCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached endpoint for `provider`, if any.
    #[must_use]
    pub fn get(&self, provider: &str) -> Option<&Endpoint> {
        self.references.get(provider)
    }

    /// Cache `endpoint` as the resolved address of `provider`.
    pub fn insert(&mut self, provider: &str, endpoint: Endpoint) {
        self.references.insert(provider.to_string(), endpoint);
    }

    /// Drop the cached endpoint for `provider`. Returns the evicted entry.
    pub fn evict(&mut self, provider: &str) -> Option<Endpoint> {
        self.references.remove(provider)
    }
}
