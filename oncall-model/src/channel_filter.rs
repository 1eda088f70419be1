//! Routing rules (`ChannelFilter`) belonging to an integration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::{AlertReceiveChannelId, ChannelFilterId};

/// How `filtering_term` is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum FilteringTermType {
    Regex,
    Jinja2,
    Labels,
    Other(u8),
}

impl From<u8> for FilteringTermType {
    fn from(raw: u8) -> Self {
        match raw {
            0 => FilteringTermType::Regex,
            1 => FilteringTermType::Jinja2,
            2 => FilteringTermType::Labels,
            other => FilteringTermType::Other(other),
        }
    }
}

impl From<FilteringTermType> for u8 {
    fn from(kind: FilteringTermType) -> Self {
        match kind {
            FilteringTermType::Regex => 0,
            FilteringTermType::Jinja2 => 1,
            FilteringTermType::Labels => 2,
            FilteringTermType::Other(other) => other,
        }
    }
}

/// An ordered routing rule. The server owns the canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelFilter {
    pub id: ChannelFilterId,
    pub alert_receive_channel: AlertReceiveChannelId,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub filtering_term: Option<String>,
    #[serde(default)]
    pub filtering_term_type: Option<FilteringTermType>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub escalation_chain: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for creating or updating a channel filter. `None` fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelFilterPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_receive_channel: Option<AlertReceiveChannelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtering_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtering_term_type: Option<FilteringTermType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_chain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
