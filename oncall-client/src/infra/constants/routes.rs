//! OnCall internal API routes, relative to the configured API path.

pub mod alert_receive_channels {
    use oncall_model::AlertReceiveChannelId;

    pub const COLLECTION: &str = "/alert_receive_channels/";
    pub const TEST_CONNECTION: &str = "/alert_receive_channels/test_connection/";
    pub const INTEGRATION_OPTIONS: &str = "/alert_receive_channels/integration_options/";
    pub const COUNTERS: &str = "/alert_receive_channels/counters/";

    pub fn item(id: &AlertReceiveChannelId) -> String {
        format!("/alert_receive_channels/{}/", encode(id))
    }

    pub fn status_options(id: &AlertReceiveChannelId) -> String {
        format!("/alert_receive_channels/{}/status_options/", encode(id))
    }

    pub fn api_token(id: &AlertReceiveChannelId) -> String {
        format!("/alert_receive_channels/{}/api_token/", encode(id))
    }

    pub fn connected_contact_points(id: &AlertReceiveChannelId) -> String {
        format!(
            "/alert_receive_channels/{}/connected_contact_points/",
            encode(id)
        )
    }

    pub fn counters(id: &AlertReceiveChannelId) -> String {
        format!("/alert_receive_channels/{}/counters/", encode(id))
    }

    fn encode(id: &AlertReceiveChannelId) -> std::borrow::Cow<'_, str> {
        urlencoding::encode(id.as_str())
    }
}

pub mod channel_filters {
    use oncall_model::ChannelFilterId;

    pub const COLLECTION: &str = "/channel_filters/";

    pub fn item(id: &ChannelFilterId) -> String {
        format!("/channel_filters/{}/", urlencoding::encode(id.as_str()))
    }

    pub fn move_to_position(id: &ChannelFilterId, position: usize) -> String {
        format!(
            "/channel_filters/{}/move_to_position/?position={}",
            urlencoding::encode(id.as_str()),
            position
        )
    }
}

pub mod templates {
    use oncall_model::AlertReceiveChannelId;

    pub fn item(id: &AlertReceiveChannelId) -> String {
        format!(
            "/alert_receive_channel_templates/{}/",
            urlencoding::encode(id.as_str())
        )
    }
}

pub mod organization {
    pub const CURRENT: &str = "/organization/";
}
