//! Shared wiring for the integration flows: one in-memory bus, directory
//! and transport, with hosts connected on demand.

use hostlink_bus::{EventBus, InMemoryEventBus};
use hostlink_core::{
    CommHub, CommandTransport, Directory, HubConfig, InMemoryDirectory, InMemoryTransport,
};
use std::sync::Arc;
use std::time::Duration;

/// The shared substrate every host of one test plugs into.
pub struct Fabric {
    pub bus: Arc<InMemoryEventBus>,
    pub directory: Arc<InMemoryDirectory>,
    pub transport: Arc<InMemoryTransport>,
}

impl Fabric {
    pub fn new() -> Self {
        // Surface library tracing in failing tests when RUST_LOG is set.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        Self {
            bus: Arc::new(InMemoryEventBus::new()),
            directory: Arc::new(InMemoryDirectory::new()),
            transport: Arc::new(InMemoryTransport::new()),
        }
    }

    /// Connect a host to this fabric.
    pub async fn connect(
        &self,
        host_id: &str,
        offered: &[&str],
        wanted: &[&str],
        config: HubConfig,
    ) -> Arc<CommHub> {
        CommHub::connect(
            host_id,
            offered.iter().map(|s| s.to_string()).collect(),
            wanted.iter().map(|s| s.to_string()).collect(),
            Arc::clone(&self.bus) as Arc<dyn EventBus>,
            Arc::clone(&self.directory) as Arc<dyn Directory>,
            Arc::clone(&self.transport) as Arc<dyn CommandTransport>,
            config,
        )
        .await
        .expect("host failed to connect")
    }
}

impl Default for Fabric {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-run `exec_cmd` until it returns a non-empty result or the deadline
/// passes; returns the last result either way.
pub async fn retry_until_nonempty(
    hub: &Arc<CommHub>,
    command: &str,
    param: &str,
    deadline: Duration,
) -> String {
    let start = tokio::time::Instant::now();
    loop {
        let result = hub.exec_cmd(command, param).await;
        if !result.is_empty() || start.elapsed() >= deadline {
            return result;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Re-run `exec_cmd` until it returns `expected` or the deadline passes;
/// returns the last result either way.
pub async fn retry_until_result(
    hub: &Arc<CommHub>,
    command: &str,
    param: &str,
    expected: &str,
    deadline: Duration,
) -> String {
    let start = tokio::time::Instant::now();
    loop {
        let result = hub.exec_cmd(command, param).await;
        if result == expected || start.elapsed() >= deadline {
            return result;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Poll `condition` until it holds or the deadline passes.
pub async fn wait_until(deadline: Duration, condition: impl Fn() -> bool) -> bool {
    let start = tokio::time::Instant::now();
    loop {
        if condition() {
            return true;
        }
        if start.elapsed() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
