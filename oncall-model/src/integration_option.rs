use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One integration kind offered by `integration_options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationOption {
    pub value: String,
    pub display_name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub featured_tag_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
