//! Value types shared across the routing core.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-local tiebreaker so two SIDs minted in the same nanosecond still
/// differ.
static SID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Opaque subscription identifier returned by a successful topic subscribe.
///
/// Generated from a high-resolution timestamp; callers keep it only to pass
/// back into `detach_event`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sid(String);

impl Sid {
    /// Mint a fresh SID.
    pub(crate) fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seq = SID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{nanos}-{seq}"))
    }

    /// The identifier as a string token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved address of a host's command server.
///
/// Opaque to the routing core: produced by the directory, consumed by the
/// call transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create an endpoint from a transport-specific address.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The transport-specific address string.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two-level directory name of a host's command server:
/// the organization context, then the `{host id}.provider` leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderName {
    organization: String,
    host_id: String,
}

impl ProviderName {
    /// Name the command server of `host_id` inside `organization`.
    pub fn new(organization: impl Into<String>, host_id: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            host_id: host_id.into(),
        }
    }

    /// The organization naming context.
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// The host id the leaf component names.
    #[must_use]
    pub fn host_id(&self) -> &str {
        &self.host_id
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}.provider", self.organization, self.host_id)
    }
}
