//! # Domain Layer
//!
//! Pure routing state: subscription and provider registries, the binding
//! table and reference cache, the control-message protocol, and the value
//! types they share. No I/O happens here; the service layer drives these
//! structures from the bus and the transport.

pub mod config;
pub mod control;
pub mod handler;
pub mod providers;
pub mod routing;
pub mod subscriptions;
pub mod types;

pub use config::HubConfig;
pub use handler::{CommandHandler, EventHandler};
pub use providers::ProviderRegistry;
pub use routing::{BindingTable, ReferenceCache};
pub use subscriptions::SubscriptionRegistry;
pub use types::{Endpoint, ProviderName, Sid};
