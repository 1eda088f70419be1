use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ids::AlertReceiveChannelId;

/// Alert volume for one integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertReceiveChannelCounters {
    #[serde(default)]
    pub alerts_count: u64,
    #[serde(default)]
    pub alert_groups_count: u64,
}

/// Wire shape of both counter endpoints: integration id -> counters.
pub type CountersResponse = HashMap<AlertReceiveChannelId, AlertReceiveChannelCounters>;
