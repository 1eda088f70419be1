use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Alert templates of one integration, keyed by template name
/// (`web_title_template`, `slack_message_template`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertTemplates(pub Map<String, Value>);

impl AlertTemplates {
    /// Template body, if the template is set to a string.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, body: Option<String>) {
        let value = body.map(Value::String).unwrap_or(Value::Null);
        self.0.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
