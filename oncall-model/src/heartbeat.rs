use crate::ids::{AlertReceiveChannelId, HeartbeatId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Liveness check attached one-to-one to an integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    pub id: HeartbeatId,
    pub alert_receive_channel: AlertReceiveChannelId,
    #[serde(default)]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub last_heartbeat_time_verbal: Option<String>,
    /// `true` while heartbeats keep arriving within the timeout.
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
