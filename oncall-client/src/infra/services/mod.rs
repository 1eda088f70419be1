//! Service abstractions the stores depend on.

pub mod api;

pub use api::OnCallApi;
