//! Domain stores
//!
//! Each domain owns one state container and the operations that keep it
//! in sync with the server.

pub mod alert_receive_channel;
pub mod heartbeat;
pub mod organization;
pub mod service_now;
