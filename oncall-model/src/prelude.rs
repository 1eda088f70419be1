//! Client focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in oncall-client or other consumers.

pub use super::alert_receive_channel::{
    AlertReceiveChannel, AlertReceiveChannelCreate, AlertReceiveChannelUpdate,
};
pub use super::channel_filter::{ChannelFilter, ChannelFilterPayload, FilteringTermType};
pub use super::contact_point::{ConnectedContactPointsPayload, ContactPoint};
pub use super::counters::{AlertReceiveChannelCounters, CountersResponse};
pub use super::heartbeat::Heartbeat;
pub use super::ids::{AlertGroupId, AlertReceiveChannelId, ChannelFilterId, HeartbeatId};
pub use super::integration_option::IntegrationOption;
pub use super::labels::AlertGroupLabels;
pub use super::organization::Organization;
pub use super::pagination::Page;
pub use super::service_now::{
    AlertGroupState, IntegrationTokenResponse, ServiceNowSettings, StatusOption,
};
pub use super::templates::AlertTemplates;
