//! Wire data model for the OnCall internal API shared by the client crates.
#![allow(missing_docs)]

pub mod alert_receive_channel;
pub mod channel_filter;
pub mod contact_point;
pub mod counters;
pub mod error;
pub mod heartbeat;
pub mod ids;
pub mod integration_option;
pub mod labels;
pub mod organization;
pub mod pagination;
pub mod prelude;
pub mod service_now;
pub mod templates;

// Intentionally curated re-exports for downstream consumers.
pub use alert_receive_channel::{
    AlertReceiveChannel, AlertReceiveChannelCreate, AlertReceiveChannelUpdate,
};
pub use channel_filter::{ChannelFilter, ChannelFilterPayload, FilteringTermType};
pub use contact_point::{
    ConnectedContactPointsPayload, ContactPoint, ContactPointRef, flatten_contact_points,
};
pub use counters::{AlertReceiveChannelCounters, CountersResponse};
pub use error::{ModelError, Result as ModelResult};
pub use heartbeat::Heartbeat;
pub use ids::{AlertGroupId, AlertReceiveChannelId, ChannelFilterId, HeartbeatId};
pub use integration_option::IntegrationOption;
pub use labels::{AlertGroupLabels, LabelEntity, LabelPair};
pub use organization::Organization;
pub use pagination::Page;
pub use service_now::{
    AlertGroupState, IntegrationTokenResponse, ServiceNowSettings, ServiceNowStateMapping,
    StatusOption,
};
pub use templates::AlertTemplates;
