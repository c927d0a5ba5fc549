//! # Reference Cache Flows
//!
//! Evict-on-failure discipline: a stale cached endpoint fails exactly one
//! call, then the next call re-resolves through the directory — without a
//! fresh discovery round.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{retry_until_nonempty, Fabric};
    use hostlink_bus::EventBus;
    use hostlink_core::{CommandHandler, CommandServer, CommandTransport, Endpoint, HubConfig};
    use std::sync::Arc;
    use std::time::Duration;

    fn replies(answer: &'static str) -> Arc<dyn CommandHandler> {
        Arc::new(move |_cmd: &str, _param: &str| answer.to_string())
    }

    #[tokio::test]
    async fn test_cache_eviction_triggers_re_resolution() {
        let fabric = Fabric::new();

        let storage = fabric
            .connect("storage", &[], &[], HubConfig::default())
            .await;
        storage.on_cmd("fetch", replies("payload")).await;

        let reader = fabric
            .connect(
                "reader",
                &[],
                &[],
                HubConfig::default().with_discovery_timeout(Duration::from_secs(2)),
            )
            .await;

        // First call discovers, resolves and caches the endpoint.
        assert_eq!(reader.exec_cmd("fetch", "").await, "payload");

        // Let the discovery side traffic quiesce before the lookup counter
        // becomes part of the assertions.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let warm_lookups = fabric.directory.lookup_count();

        // Second call rides the cached reference: no directory traffic.
        assert_eq!(reader.exec_cmd("fetch", "").await, "payload");
        assert_eq!(fabric.directory.lookup_count(), warm_lookups);

        // The provider dies. The failing call evicts the reference without
        // resolving anything.
        assert!(fabric.transport.disconnect(&Endpoint::new("storage")));
        assert_eq!(reader.exec_cmd("fetch", "").await, "");
        assert_eq!(fabric.directory.lookup_count(), warm_lookups);

        // The provider comes back under its name; the next call re-resolves
        // instead of retrying the dead handle.
        fabric
            .transport
            .serve("storage", Arc::clone(&storage) as Arc<dyn CommandServer>)
            .expect("re-serve");
        assert_eq!(reader.exec_cmd("fetch", "").await, "payload");
        assert_eq!(fabric.directory.lookup_count(), warm_lookups + 1);
    }

    /// The binding survives a dead provider: recovery happens without a
    /// single want broadcast, so it is re-resolution, not rediscovery.
    #[tokio::test]
    async fn test_binding_survives_provider_outage() {
        let fabric = Fabric::new();

        let storage = fabric
            .connect("storage", &[], &[], HubConfig::default())
            .await;
        storage.on_cmd("fetch", replies("payload")).await;

        let reader = fabric
            .connect("reader", &[], &["fetch"], HubConfig::default())
            .await;
        let primed =
            retry_until_nonempty(&reader, "fetch", "", Duration::from_secs(2)).await;
        assert_eq!(primed, "payload");

        // Quiesce, then freeze the bus counter: a discovery round would
        // publish a want announcement and move it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let published = fabric.bus.messages_published();

        assert!(fabric.transport.disconnect(&Endpoint::new("storage")));
        assert_eq!(reader.exec_cmd("fetch", "").await, "");

        fabric
            .transport
            .serve("storage", Arc::clone(&storage) as Arc<dyn CommandServer>)
            .expect("re-serve");
        assert_eq!(reader.exec_cmd("fetch", "").await, "payload");

        assert_eq!(fabric.bus.messages_published(), published);
    }
}
