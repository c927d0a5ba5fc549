//! Hub configuration.

use std::time::Duration;

/// How long `exec_cmd` waits for a provider announcement before giving up.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_millis(100);

/// Default organization context used for directory names.
pub const DEFAULT_ORGANIZATION: &str = "hostlink";

/// Configuration for a [`CommHub`](crate::CommHub) instance.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Upper bound on the per-call discovery wait. A blocked `exec_cmd`
    /// returns an empty result once this elapses without a provider
    /// announcement.
    pub discovery_timeout: Duration,

    /// Organization context under which command servers are named in the
    /// directory. All hosts of one deployment must share it.
    pub organization: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            discovery_timeout: DEFAULT_DISCOVERY_TIMEOUT,
            organization: DEFAULT_ORGANIZATION.to_string(),
        }
    }
}

impl HubConfig {
    /// Override the discovery timeout.
    #[must_use]
    pub fn with_discovery_timeout(mut self, timeout: Duration) -> Self {
        self.discovery_timeout = timeout;
        self
    }

    /// Override the organization naming context.
    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }
}
