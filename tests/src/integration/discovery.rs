//! # Discovery Flows
//!
//! The lazy command-routing handshake between requesters and providers:
//! want-then-offer, offer-then-want, timeout, retry, and rebinding.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{retry_until_nonempty, retry_until_result, Fabric};
    use hostlink_core::{CommandHandler, HubConfig};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    fn replies(answer: &'static str) -> Arc<dyn CommandHandler> {
        Arc::new(move |_cmd: &str, _param: &str| answer.to_string())
    }

    /// A requester blocked in `exec_cmd` is woken by a provider that
    /// advertises while the call is in flight, well within the timeout.
    #[tokio::test]
    async fn test_blocked_call_unblocks_when_provider_advertises() {
        let fabric = Fabric::new();
        let requester = fabric
            .connect(
                "requester",
                &[],
                &[],
                HubConfig::default().with_discovery_timeout(Duration::from_secs(2)),
            )
            .await;

        let pending = tokio::spawn({
            let requester = Arc::clone(&requester);
            async move { requester.exec_cmd("greet", "world").await }
        });

        // Let the call reach its discovery wait before the provider shows up.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let provider = fabric
            .connect("provider", &[], &[], HubConfig::default())
            .await;
        provider
            .on_cmd(
                "greet",
                Arc::new(|_cmd: &str, param: &str| format!("hello {param}")),
            )
            .await;

        let result = timeout(Duration::from_secs(2), pending)
            .await
            .expect("blocked call did not unblock within the timeout bound")
            .expect("exec task panicked");
        assert_eq!(result, "hello world");
    }

    /// When the provider is already present, the requester's first call is
    /// answered within one want-broadcast cycle.
    #[tokio::test]
    async fn test_want_broadcast_completes_against_existing_provider() {
        let fabric = Fabric::new();
        let provider = fabric
            .connect("provider", &[], &[], HubConfig::default())
            .await;
        provider.on_cmd("fetch", replies("payload")).await;

        let requester = fabric
            .connect(
                "requester",
                &[],
                &[],
                HubConfig::default().with_discovery_timeout(Duration::from_secs(2)),
            )
            .await;

        assert_eq!(requester.exec_cmd("fetch", "").await, "payload");
    }

    /// No provider anywhere: the call comes back empty after the timeout.
    #[tokio::test]
    async fn test_unprovided_command_times_out_empty() {
        let fabric = Fabric::new();
        let requester = fabric
            .connect(
                "requester",
                &[],
                &[],
                HubConfig::default().with_discovery_timeout(Duration::from_millis(30)),
            )
            .await;
        let _other = fabric.connect("other", &[], &[], HubConfig::default()).await;

        assert_eq!(requester.exec_cmd("nothingOffersThis", "x").await, "");
    }

    /// A timed-out command stays wanted: the provider's later advertisement
    /// completes the binding for a future retry.
    #[tokio::test]
    async fn test_retry_after_timeout_succeeds() {
        let fabric = Fabric::new();
        let requester = fabric
            .connect(
                "requester",
                &[],
                &[],
                HubConfig::default().with_discovery_timeout(Duration::from_millis(30)),
            )
            .await;

        assert_eq!(requester.exec_cmd("lateData", "").await, "");

        let provider = fabric
            .connect("provider", &[], &[], HubConfig::default())
            .await;
        provider.on_cmd("lateData", replies("payload")).await;

        let result =
            retry_until_nonempty(&requester, "lateData", "", Duration::from_secs(2)).await;
        assert_eq!(result, "payload");
    }

    /// At most one binding per command: a later announcement overwrites the
    /// provider, it never appends a second one.
    #[tokio::test]
    async fn test_later_announcement_overwrites_binding() {
        let fabric = Fabric::new();
        let requester = fabric
            .connect(
                "requester",
                &[],
                &[],
                HubConfig::default().with_discovery_timeout(Duration::from_millis(30)),
            )
            .await;

        // Record the want, then let the first provider bind.
        let _ = requester.exec_cmd("status", "").await;

        let first = fabric.connect("first", &[], &[], HubConfig::default()).await;
        first.on_cmd("status", replies("from-first")).await;
        assert_eq!(
            retry_until_result(&requester, "status", "", "from-first", Duration::from_secs(2))
                .await,
            "from-first"
        );

        let second = fabric
            .connect("second", &[], &[], HubConfig::default())
            .await;
        second.on_cmd("status", replies("from-second")).await;
        assert_eq!(
            retry_until_result(&requester, "status", "", "from-second", Duration::from_secs(2))
                .await,
            "from-second"
        );
    }
}
