//! # Provider Registry
//!
//! Maps locally-offered command names to their handlers. Registration is
//! first-wins: offering the same command twice keeps the original handler.

use crate::domain::handler::CommandHandler;
use std::collections::HashMap;
use std::sync::Arc;

/// Command name → local handler map.
#[derive(Default)]
pub struct ProviderRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `command`.
    ///
    /// Returns `false` when the command already has a handler; the existing
    /// one is kept.
    pub fn register(&mut self, command: &str, handler: Arc<dyn CommandHandler>) -> bool {
        if self.handlers.contains_key(command) {
            return false;
        }
        self.handlers.insert(command.to_string(), handler);
        true
    }

    /// Look up the handler for `command`.
    ///
    /// The caller invokes the returned handler outside the registry lock.
    #[must_use]
    pub fn get(&self, command: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(command).cloned()
    }

    /// Whether a handler is registered for `command`.
    #[must_use]
    pub fn contains(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }
}
