//! Test doubles for store tests.

pub mod fixtures;
pub mod stubs;

pub use stubs::StubOnCallApi;
