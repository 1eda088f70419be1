use oncall_model::{
    AlertReceiveChannel, AlertReceiveChannelId, ChannelFilter, ChannelFilterId,
};
use serde_json::json;

pub fn channel_id(raw: &str) -> AlertReceiveChannelId {
    AlertReceiveChannelId::new(raw).expect("fixture id")
}

pub fn filter_id(raw: &str) -> ChannelFilterId {
    ChannelFilterId::new(raw).expect("fixture id")
}

pub fn channel(id: &str, name: &str) -> AlertReceiveChannel {
    serde_json::from_value(json!({
        "id": id,
        "integration": "webhook",
        "verbal_name": name,
        "description_short": format!("{name} alerts"),
        "allow_source_based_resolving": true,
        "alert_group_labels": { "inheritable": {}, "custom": [], "template": null },
        "heartbeat": null,
    }))
    .expect("fixture channel")
}

pub fn channel_with_heartbeat(id: &str, name: &str, heartbeat_id: &str) -> AlertReceiveChannel {
    serde_json::from_value(json!({
        "id": id,
        "integration": "grafana_alerting",
        "verbal_name": name,
        "heartbeat": {
            "id": heartbeat_id,
            "alert_receive_channel": id,
            "timeout_seconds": 3600,
            "status": true,
        },
    }))
    .expect("fixture channel")
}

pub fn filter(id: &str, channel: &str, order: u32) -> ChannelFilter {
    serde_json::from_value(json!({
        "id": id,
        "alert_receive_channel": channel,
        "order": order,
        "filtering_term": format!("team = {id}"),
        "filtering_term_type": 0,
        "is_default": false,
    }))
    .expect("fixture filter")
}
