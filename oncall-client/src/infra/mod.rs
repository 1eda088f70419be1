pub mod adapters;
pub mod api_client;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod notifications;
pub mod services;
pub mod store;

#[cfg(test)]
pub mod testing;

pub use api_client::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
