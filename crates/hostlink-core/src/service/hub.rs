//! # CommHub
//!
//! The host-facing surface of the routing core. One `CommHub` represents one
//! host on the shared bus: it owns every registry, serves the host's
//! commands, and funnels inbound bus traffic through its dispatcher task.

use crate::domain::control;
use crate::domain::{
    BindingTable, CommandHandler, EventHandler, HubConfig, ProviderName, ProviderRegistry,
    ReferenceCache, Sid, SubscriptionRegistry,
};
use crate::ports::{CommandServer, CommandTransport, Directory, DirectoryError, TransportError};
use crate::service::dispatch::spawn_dispatcher;
use crate::service::router::DiscoveryGates;

use async_trait::async_trait;
use hostlink_bus::{BusError, BusFilter, BusMessage, EventBus, Filter, OFFER_SERVICES, WANT_SERVICES};
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Failures while establishing a host's presence on the bus.
///
/// These are the only fatal errors the core produces; everything after a
/// successful connect degrades to empty-string/false sentinels.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The host id is the process's identity on the bus and must not be
    /// empty.
    #[error("host id must not be empty")]
    EmptyHostId,

    /// The event bus subscription could not be established.
    #[error("event bus connection failed: {0}")]
    Bus(#[from] BusError),

    /// The command server could not be activated.
    #[error("command server activation failed: {0}")]
    Transport(#[from] TransportError),

    /// The command server's name could not be bound in the directory.
    #[error("directory bind failed: {0}")]
    Directory(#[from] DirectoryError),
}

/// One host's routing core.
///
/// Created through [`CommHub::connect`]; shared as `Arc<CommHub>` between
/// application tasks, the inbound dispatcher and the command server.
pub struct CommHub {
    pub(crate) host_id: String,
    pub(crate) config: HubConfig,

    // Collaborators
    pub(crate) bus: Arc<dyn EventBus>,
    pub(crate) directory: Arc<dyn Directory>,
    pub(crate) transport: Arc<dyn CommandTransport>,

    // Registries; each behind its own lock, never held across an await.
    pub(crate) subscriptions: Mutex<SubscriptionRegistry>,
    pub(crate) providers: RwLock<ProviderRegistry>,
    pub(crate) offered: Mutex<HashSet<String>>,
    pub(crate) wanted: Mutex<HashSet<String>>,
    pub(crate) bindings: Mutex<BindingTable>,
    pub(crate) references: Mutex<ReferenceCache>,
    pub(crate) gates: DiscoveryGates,
}

impl CommHub {
    /// Join the bus as `host_id` and start serving.
    ///
    /// `offered_commands` seeds the offered set and is announced right away
    /// (handlers attach later via [`on_cmd`](Self::on_cmd)); seeding
    /// `wanted_commands` announces wants so providers respond before the
    /// first `exec_cmd`.
    ///
    /// # Errors
    ///
    /// Any [`ConnectError`] is fatal: the host has no working presence on
    /// the bus and the process should not continue.
    pub async fn connect(
        host_id: &str,
        offered_commands: Vec<String>,
        wanted_commands: Vec<String>,
        bus: Arc<dyn EventBus>,
        directory: Arc<dyn Directory>,
        transport: Arc<dyn CommandTransport>,
        config: HubConfig,
    ) -> Result<Arc<Self>, ConnectError> {
        if host_id.is_empty() {
            return Err(ConnectError::EmptyHostId);
        }

        let hub = Arc::new(Self {
            host_id: host_id.to_string(),
            config,
            bus,
            directory,
            transport,
            subscriptions: Mutex::new(SubscriptionRegistry::new()),
            providers: RwLock::new(ProviderRegistry::new()),
            offered: Mutex::new(offered_commands.iter().cloned().collect()),
            wanted: Mutex::new(wanted_commands.iter().cloned().collect()),
            bindings: Mutex::new(BindingTable::new()),
            references: Mutex::new(ReferenceCache::new()),
            gates: DiscoveryGates::new(),
        });

        // Activate the command server and make it resolvable by name.
        let server: Arc<dyn CommandServer> = Arc::clone(&hub) as Arc<dyn CommandServer>;
        let endpoint = hub.transport.serve(host_id, server)?;
        let name = ProviderName::new(&hub.config.organization, host_id);
        hub.directory.bind(&name, endpoint).await?;

        // Every host provides one implicit control command, named by its own
        // host id, through which providers answer want announcements.
        let control_hub = Arc::downgrade(&hub);
        let control_handler: Arc<dyn CommandHandler> =
            Arc::new(move |_command: &str, param: &str| -> String {
                if let Some(hub) = control_hub.upgrade() {
                    hub.handle_provider_response(param);
                }
                String::new()
            });
        hub.providers.write().register(host_id, control_handler);

        // Start consuming bus traffic before announcing anything, so answers
        // to the announcements below cannot be missed.
        let subscription = hub.bus.subscribe(BusFilter::exclude_sender(host_id))?;
        spawn_dispatcher(&hub, subscription);

        for command in &offered_commands {
            hub.announce(OFFER_SERVICES, command).await;
        }
        for command in &wanted_commands {
            hub.announce(WANT_SERVICES, command).await;
        }

        info!(host_id, organization = %hub.config.organization, "host connected");
        Ok(hub)
    }

    /// This host's identity on the bus.
    #[must_use]
    pub fn host_id(&self) -> &str {
        &self.host_id
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Subscribe `handler` to `topic`.
    ///
    /// Returns the subscription id, or `None` when the topic is empty or
    /// the identical `{topic, handler}` pair is already subscribed (the
    /// documented idempotence signal).
    pub fn on_event(&self, topic: &str, handler: Arc<dyn EventHandler>) -> Option<Sid> {
        let sid = self.subscriptions.lock().subscribe(topic, handler);
        if sid.is_none() {
            debug!(topic, "subscription rejected (empty topic or duplicate handler)");
        }
        sid
    }

    /// Detach the subscription issued as `sid`. Unknown SIDs are a no-op.
    pub fn detach_event(&self, sid: &Sid) {
        self.subscriptions.lock().unsubscribe(sid);
    }

    /// Publish a fire-and-forget event on `topic`.
    ///
    /// Attaches the standard `{sender, command=topic}` filter pair. Returns
    /// `false` when the topic is empty or the bus rejects the publication;
    /// failures are never retried or queued.
    pub async fn push_event(&self, topic: &str, param: &str) -> bool {
        if topic.is_empty() {
            debug!("refusing to publish event with empty topic");
            return false;
        }
        self.publish(BusMessage::event(&self.host_id, topic, param))
            .await
    }

    /// Publish an event with explicit filter pairs, for callers needing
    /// richer filtering than the standard `{sender, command}` layout.
    pub async fn push_event_with_filters(&self, filters: Vec<Filter>, param: &str) -> bool {
        self.publish(BusMessage::with_filters(filters, param)).await
    }

    /// Offer `command` on this host, answered by `handler`.
    ///
    /// First registration wins: offering the same command twice keeps the
    /// original handler. A newly offered command is announced on the bus
    /// and immediately bound to this host, so self-calls never wait on
    /// discovery.
    pub async fn on_cmd(&self, command: &str, handler: Arc<dyn CommandHandler>) {
        if command.is_empty() {
            debug!("ignoring handler registration for empty command name");
            return;
        }

        let newly_offered =
            command != self.host_id && self.offered.lock().insert(command.to_string());

        if self.providers.write().register(command, handler) {
            self.bindings.lock().bind(command, &self.host_id);
            self.gates.signal(command);
        } else {
            debug!(command, "duplicate handler registration ignored");
        }

        if newly_offered {
            self.announce(OFFER_SERVICES, command).await;
        }
    }

    /// Run `command` through the local provider registry.
    ///
    /// The empty-string result for an unregistered command is what remote
    /// callers read as command-not-found.
    pub(crate) fn invoke_local(&self, command: &str, param: &str) -> String {
        let handler = self.providers.read().get(command);
        match handler {
            Some(handler) => handler.handle(command, param),
            None => String::new(),
        }
    }

    /// Deliver an event to every local subscriber of `topic`.
    ///
    /// Handlers are invoked synchronously on the calling task, outside the
    /// registry lock.
    pub(crate) fn dispatch_event(&self, topic: &str, param: &str) {
        let handlers = self.subscriptions.lock().handlers_for(topic);
        for handler in &handlers {
            handler.on_event(topic, param);
        }
    }

    /// Record a provider binding announced through the directed control
    /// call (`{command};{provider}` payload on this host's control command).
    pub(crate) fn handle_provider_response(&self, param: &str) {
        let Some((command, provider)) = control::parse_provider_response(param) else {
            debug!(param, "ignoring malformed provider response");
            return;
        };
        self.record_provider(command, provider);
    }

    /// Bind `provider` for `command` if this host wants it, refresh the
    /// reference cache, and wake any blocked caller.
    pub(crate) fn record_provider(&self, command: &str, provider: &str) {
        if !self.wanted.lock().contains(command) {
            return;
        }
        self.bindings.lock().bind(command, provider);
        // Whatever reference we held for that provider predates this
        // announcement; resolve afresh on the next call.
        self.references.lock().evict(provider);
        self.gates.signal(command);
        debug!(command, provider, "provider binding recorded");
    }

    /// Broadcast a discovery announcement of the given type for `command`.
    pub(crate) async fn announce(&self, type_tag: &str, command: &str) -> bool {
        let ok = self
            .publish(BusMessage::announcement(&self.host_id, type_tag, command))
            .await;
        if !ok {
            warn!(type_tag, command, "announcement could not be published");
        }
        ok
    }

    async fn publish(&self, message: BusMessage) -> bool {
        match self.bus.publish(message).await {
            Ok(_) => true,
            Err(err) => {
                warn!(%err, "bus publish failed");
                false
            }
        }
    }
}

#[async_trait]
impl CommandServer for CommHub {
    async fn exec(&self, command: &str, param: &str) -> String {
        self.invoke_local(command, param)
    }
}

/// The process-wide hub used by [`connect_global`].
static GLOBAL_HUB: OnceCell<Arc<CommHub>> = OnceCell::const_new();

/// Connect the process-wide hub, or return the existing one.
///
/// The first call constructs the singleton; repeated calls return the same
/// instance and ignore all arguments. Code that needs independent instances
/// (tests in particular) uses [`CommHub::connect`] directly.
///
/// # Errors
///
/// Propagates [`ConnectError`] from the first, constructing call; a failed
/// construction leaves the slot empty so a later call may retry.
pub async fn connect_global(
    host_id: &str,
    offered_commands: Vec<String>,
    wanted_commands: Vec<String>,
    bus: Arc<dyn EventBus>,
    directory: Arc<dyn Directory>,
    transport: Arc<dyn CommandTransport>,
    config: HubConfig,
) -> Result<Arc<CommHub>, ConnectError> {
    GLOBAL_HUB
        .get_or_try_init(|| {
            CommHub::connect(
                host_id,
                offered_commands,
                wanted_commands,
                bus,
                directory,
                transport,
                config,
            )
        })
        .await
        .map(Arc::clone)
}
