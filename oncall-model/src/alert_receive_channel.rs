//! Integration records (`AlertReceiveChannel`) and their write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::heartbeat::Heartbeat;
use crate::ids::AlertReceiveChannelId;
use crate::labels::{AlertGroupLabels, LabelPair};
use crate::service_now::ServiceNowSettings;

/// A configured source of alerts.
///
/// Fields the model does not name are kept in [`extra`](Self::extra) so a
/// cached record can be written back without dropping server data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertReceiveChannel {
    pub id: AlertReceiveChannelId,
    /// Integration kind, e.g. `grafana_alerting`, `webhook`, `servicenow`.
    #[serde(default)]
    pub integration: String,
    #[serde(default)]
    pub verbal_name: Option<String>,
    #[serde(default)]
    pub description_short: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub integration_url: Option<String>,
    #[serde(default)]
    pub allow_source_based_resolving: bool,
    #[serde(default)]
    pub alert_group_labels: AlertGroupLabels,
    #[serde(default)]
    pub labels: Vec<LabelPair>,
    #[serde(default)]
    pub heartbeat: Option<Heartbeat>,
    #[serde(default)]
    pub additional_settings: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AlertReceiveChannel {
    /// Copy of the record without its embedded heartbeat.
    pub fn without_heartbeat(&self) -> Self {
        Self {
            heartbeat: None,
            ..self.clone()
        }
    }

    /// Parses `additional_settings` as ServiceNow settings, if present.
    pub fn service_now_settings(&self) -> Option<ServiceNowSettings> {
        self.additional_settings
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Name shown to users: the verbal name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.verbal_name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Body of `POST /alert_receive_channels/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertReceiveChannelCreate {
    pub integration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_short: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub labels: Vec<LabelPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_group_labels: Option<AlertGroupLabels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_settings: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_default_webhooks: Option<bool>,
}

/// Body of `PUT /alert_receive_channels/{id}/`.
///
/// Only fields that are `Some` are sent. The name and short description
/// can be cleared:
/// - outer `None`: left out of the request
/// - `Some(None)`: sent as `null`
/// - `Some(Some(v))`: set to `v`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertReceiveChannelUpdate {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub verbal_name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description_short: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_source_based_resolving: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_group_labels: Option<AlertGroupLabels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<LabelPair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_settings: Option<Value>,
}

impl AlertReceiveChannelUpdate {
    /// Fills the fields a save must never clobber from the cached record,
    /// keeping every value this payload already sets.
    pub fn over(self, current: &AlertReceiveChannel) -> Self {
        Self {
            description_short: self
                .description_short
                .or_else(|| current.description_short.clone().map(Some)),
            verbal_name: self
                .verbal_name
                .or_else(|| current.verbal_name.clone().map(Some)),
            allow_source_based_resolving: self
                .allow_source_based_resolving
                .or(Some(current.allow_source_based_resolving)),
            alert_group_labels: self
                .alert_group_labels
                .or_else(|| Some(current.alert_group_labels.clone())),
            ..self
        }
    }
}

/// `Some(inner)` when the field is present, even as `null`; `None` (via
/// `#[serde(default)]`) when absent.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}
