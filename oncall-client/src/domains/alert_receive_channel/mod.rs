//! Integrations (`AlertReceiveChannel`) and everything cached per integration.

pub mod helpers;
pub mod query;
pub mod state;
pub mod store;


pub use query::{IntegrationFilters, ItemsQuery, PaginatedQuery};
pub use state::{
    AlertReceiveChannelAction, AlertReceiveChannelChange, AlertReceiveChannelState,
    PaginatedSearchResult,
};
pub use store::AlertReceiveChannelStore;
