//! # Command Router & Discovery Coordinator
//!
//! The client side of command routing. `exec_cmd` resolves a command to its
//! provider, lazily discovering one when no binding exists:
//!
//! ```text
//! Unbound ──want broadcast──▶ Discovering ──signal──▶ Bound ──▶ call
//!    ▲                            │timeout                │failure
//!    └────────────────────────────┘              evict cached reference
//! ```
//!
//! Per command there is one readiness gate (a `watch` channel): inbound
//! announcement handling flips it, blocked callers wait on it with the
//! configured timeout.

use crate::domain::ProviderName;
use crate::service::hub::CommHub;

use hostlink_bus::WANT_SERVICES;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Per-command wait conditions for in-flight discovery.
///
/// A gate exists only while a command is (or recently was) unresolved; it is
/// removed again once no caller waits on it.
pub(crate) struct DiscoveryGates {
    gates: Mutex<HashMap<String, watch::Sender<bool>>>,
}

impl DiscoveryGates {
    pub(crate) fn new() -> Self {
        Self {
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Register a waiter for `command` and return its readiness receiver.
    ///
    /// The gate is reset to "not ready" only when no other caller is
    /// currently waiting, so an in-flight signal is never stomped.
    fn arm(&self, command: &str) -> watch::Receiver<bool> {
        let mut gates = self.gates.lock();
        let gate = gates
            .entry(command.to_string())
            .or_insert_with(|| watch::channel(false).0);
        if gate.receiver_count() == 0 {
            gate.send_replace(false);
        }
        gate.subscribe()
    }

    /// Wake every caller blocked on `command`.
    pub(crate) fn signal(&self, command: &str) {
        if let Some(gate) = self.gates.lock().get(command) {
            gate.send_replace(true);
        }
    }

    /// Drop the gate for `command` once nobody waits on it.
    fn disarm_if_idle(&self, command: &str) {
        let mut gates = self.gates.lock();
        if let Some(gate) = gates.get(command) {
            if gate.receiver_count() == 0 {
                gates.remove(command);
            }
        }
    }
}

impl CommHub {
    /// Call `command` with `param` on whichever host provides it.
    ///
    /// Blocks the calling task for up to the configured discovery timeout
    /// while an unknown command is resolved. Returns the provider's answer,
    /// or an empty string on timeout, unknown command, or unreachable
    /// provider — indistinguishable by design; the caller decides whether
    /// to retry.
    pub async fn exec_cmd(self: &Arc<Self>, command: &str, param: &str) -> String {
        if command.is_empty() {
            debug!("refusing to route empty command name");
            return String::new();
        }

        loop {
            let bound = self
                .bindings
                .lock()
                .provider_of(command)
                .map(str::to_string);
            match bound {
                Some(provider) => return self.call_provider(&provider, command, param).await,
                None => {
                    if !self.discover(command).await {
                        return String::new();
                    }
                    // A provider announced itself; re-run resolution from the
                    // top, the binding may have changed again in between.
                }
            }
        }
    }

    /// One discovery round for `command`: broadcast the want, wait on the
    /// gate. `true` means a binding arrived and resolution should re-run.
    async fn discover(self: &Arc<Self>, command: &str) -> bool {
        // The command stays wanted even if this round times out; a later
        // spontaneous announcement still completes the binding.
        self.wanted.lock().insert(command.to_string());

        let mut ready = self.gates.arm(command);

        // An announcement may have landed between the binding check and
        // arming the gate; re-check so its signal is not lost.
        if self.bindings.lock().provider_of(command).is_some() {
            drop(ready);
            self.gates.disarm_if_idle(command);
            return true;
        }

        // Fire the broadcast on a detached task: the caller pays for the
        // wait, not for publish latency.
        let hub = Arc::clone(self);
        let wanted = command.to_string();
        tokio::spawn(async move {
            hub.announce(WANT_SERVICES, &wanted).await;
        });

        let signaled = matches!(
            timeout(self.config.discovery_timeout, ready.wait_for(|r| *r)).await,
            Ok(Ok(_))
        );
        drop(ready);
        self.gates.disarm_if_idle(command);

        if !signaled {
            debug!(command, "discovery timed out with no provider");
        }
        signaled
    }

    /// Invoke `command` on the bound `provider`, going through the local
    /// registry for self-bindings and the reference cache for remote ones.
    async fn call_provider(&self, provider: &str, command: &str, param: &str) -> String {
        if provider == self.host_id {
            return self.invoke_local(command, param);
        }

        let cached = self.references.lock().get(provider).cloned();
        if let Some(endpoint) = cached {
            return match self.transport.call(&endpoint, command, param).await {
                Ok(result) => result,
                Err(err) => {
                    // Stale handle: evict, fail this call, keep the binding.
                    // The next call re-resolves through the directory.
                    warn!(provider, command, %err, "cached provider reference failed");
                    self.references.lock().evict(provider);
                    String::new()
                }
            };
        }

        let name = ProviderName::new(&self.config.organization, provider);
        let endpoint = match self.directory.resolve(&name).await {
            Ok(endpoint) => endpoint,
            Err(err) => {
                warn!(provider, command, %err, "provider name resolution failed");
                return String::new();
            }
        };

        match self.transport.call(&endpoint, command, param).await {
            Ok(result) => {
                self.references.lock().insert(provider, endpoint);
                result
            }
            Err(err) => {
                warn!(provider, command, %err, "provider call failed");
                String::new()
            }
        }
    }
}
