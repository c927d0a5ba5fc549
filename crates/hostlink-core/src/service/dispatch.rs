//! # Inbound Dispatcher
//!
//! The single funnel from the bus into the core. One spawned task per hub
//! drains the bus subscription and classifies every message by its type tag:
//!
//! - `offer services` — a provider announced a command: record the binding
//!   if we want it and wake blocked callers
//! - `want services` — a requester is looking for a command we offer:
//!   answer it with a directed control call
//! - anything else — an ordinary topic event for the subscription registry
//!
//! The dispatch task never blocks on unbounded work: the want response
//! crosses the network and therefore runs on its own task.

use crate::service::hub::CommHub;

use hostlink_bus::{BusMessage, BusSubscription, OFFER_SERVICES, WANT_SERVICES};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Start the hub's inbound dispatch loop.
///
/// The task holds only a `Weak` reference: when the last application handle
/// drops, the loop exits on its own.
pub(crate) fn spawn_dispatcher(
    hub: &Arc<CommHub>,
    mut subscription: BusSubscription,
) -> JoinHandle<()> {
    let weak = Arc::downgrade(hub);
    tokio::spawn(async move {
        while let Some(message) = subscription.recv().await {
            let Some(hub) = weak.upgrade() else {
                break;
            };
            hub.handle_inbound(message);
        }
        debug!("inbound dispatch loop terminated");
    })
}

impl CommHub {
    /// Classify and route one inbound bus message.
    pub(crate) fn handle_inbound(self: &Arc<Self>, message: BusMessage) {
        let Some(sender) = message.sender().map(str::to_string) else {
            debug!("dropping bus message without sender tag");
            return;
        };
        let Some(tag) = message.type_tag().cloned() else {
            debug!(%sender, "dropping bus message without type tag");
            return;
        };

        match tag.key.as_str() {
            OFFER_SERVICES => self.handle_offer_announcement(&sender, &tag.value),
            WANT_SERVICES => self.handle_want_announcement(&sender, &tag.value),
            _ => self.dispatch_event(&tag.value, &message.body),
        }
    }

    /// A peer announced it offers `command`.
    fn handle_offer_announcement(&self, announcer: &str, command: &str) {
        self.record_provider(command, announcer);
    }

    /// A peer is looking for a provider of `command`.
    fn handle_want_announcement(self: &Arc<Self>, requester: &str, command: &str) {
        if !self.offered.lock().contains(command) {
            return;
        }

        // Answer off the dispatch task; the notify call crosses the network.
        let hub = Arc::clone(self);
        let requester = requester.to_string();
        let command = command.to_string();
        tokio::spawn(async move {
            hub.notify_requester(&requester, &command).await;
        });
    }

    /// Tell `requester` directly that this host provides `command`, by
    /// calling its control command. Failures are absorbed: the requester
    /// can still learn of us through a later offer announcement.
    async fn notify_requester(&self, requester: &str, command: &str) {
        let name = crate::domain::ProviderName::new(&self.config.organization, requester);
        let endpoint = match self.directory.resolve(&name).await {
            Ok(endpoint) => endpoint,
            Err(err) => {
                debug!(requester, %err, "cannot resolve requester for provider response");
                return;
            }
        };

        let payload = crate::domain::control::provider_response_payload(command, &self.host_id);
        if let Err(err) = self.transport.call(&endpoint, requester, &payload).await {
            debug!(requester, command, %err, "provider response call dropped");
        }
    }
}
