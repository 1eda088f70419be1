//! Label configuration attached to integrations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key or value half of a label pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntity {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub prescribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPair {
    pub key: LabelEntity,
    pub value: LabelEntity,
}

/// Routing configuration controlling which labels alert groups receive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertGroupLabels {
    /// Integration label key id -> whether alert groups inherit it.
    #[serde(default)]
    pub inheritable: BTreeMap<String, bool>,
    #[serde(default)]
    pub custom: Vec<LabelPair>,
    /// Jinja2 template producing extra labels, if configured.
    #[serde(default)]
    pub template: Option<String>,
}
