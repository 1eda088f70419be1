//! OnCall client library
//!
//! Observable client-side stores that mirror OnCall server resources
//! (integrations, routes, heartbeats, counters, templates, contact points)
//! over the internal HTTP API.
//!
//! Notes
//! - [`state::RootStore`] is the entry point; it wires every domain store to
//!   one [`infra::services::api::OnCallApi`] implementation.
//! - The `oncallctl` binary in `src/main.rs` is a thin consumer of the stores.

pub mod domains;
pub mod infra;
pub mod state;

pub use domains::alert_receive_channel::{
    AlertReceiveChannelStore, IntegrationFilters, ItemsQuery, PaginatedQuery,
};
pub use domains::service_now::{ServiceNowConfigFlow, ServiceNowCredentials};
pub use infra::{ClientConfig, ClientError, ClientResult};
pub use state::RootStore;
