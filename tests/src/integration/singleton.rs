//! # Process-Wide Connect
//!
//! `connect_global` constructs the hub once; repeated calls return the same
//! instance and ignore their arguments.

#[cfg(test)]
mod tests {
    use crate::integration::harness::Fabric;
    use hostlink_bus::EventBus;
    use hostlink_core::{connect_global, CommandTransport, Directory, HubConfig};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_connect_global_is_process_wide() {
        let fabric = Fabric::new();
        let first = connect_global(
            "main",
            vec![],
            vec![],
            Arc::clone(&fabric.bus) as Arc<dyn EventBus>,
            Arc::clone(&fabric.directory) as Arc<dyn Directory>,
            Arc::clone(&fabric.transport) as Arc<dyn CommandTransport>,
            HubConfig::default(),
        )
        .await
        .expect("first connect");

        // Different arguments, even a different fabric: ignored.
        let other_fabric = Fabric::new();
        let second = connect_global(
            "other",
            vec!["getData".to_string()],
            vec![],
            Arc::clone(&other_fabric.bus) as Arc<dyn EventBus>,
            Arc::clone(&other_fabric.directory) as Arc<dyn Directory>,
            Arc::clone(&other_fabric.transport) as Arc<dyn CommandTransport>,
            HubConfig::default(),
        )
        .await
        .expect("second connect");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.host_id(), "main");
    }
}
