use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The organization the client is acting in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub pk: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stack_slug: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
