//! ServiceNow integration settings carried in `additional_settings`.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// `(status id, display label)` pair as returned by `status_options`.
pub type StatusOption = (String, String);

/// Alert group states that can be mirrored into ServiceNow incident states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertGroupState {
    Firing,
    Acknowledged,
    Resolved,
    Silenced,
}

impl AlertGroupState {
    pub const ALL: [AlertGroupState; 4] = [
        AlertGroupState::Firing,
        AlertGroupState::Acknowledged,
        AlertGroupState::Resolved,
        AlertGroupState::Silenced,
    ];
}

/// Mapping of alert group states to ServiceNow status options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceNowStateMapping {
    #[serde(default)]
    pub firing: Option<StatusOption>,
    #[serde(default)]
    pub acknowledged: Option<StatusOption>,
    #[serde(default)]
    pub resolved: Option<StatusOption>,
    #[serde(default)]
    pub silenced: Option<StatusOption>,
}

impl ServiceNowStateMapping {
    pub fn get(&self, state: AlertGroupState) -> Option<&StatusOption> {
        match state {
            AlertGroupState::Firing => self.firing.as_ref(),
            AlertGroupState::Acknowledged => self.acknowledged.as_ref(),
            AlertGroupState::Resolved => self.resolved.as_ref(),
            AlertGroupState::Silenced => self.silenced.as_ref(),
        }
    }

    /// Sets `state` to `option`, which must be one of `available`.
    pub fn set(
        &mut self,
        state: AlertGroupState,
        option: Option<StatusOption>,
        available: &[StatusOption],
    ) -> Result<(), ModelError> {
        if let Some(option) = &option
            && !available.contains(option)
        {
            return Err(ModelError::UnknownStatusOption(option.0.clone()));
        }

        let slot = match state {
            AlertGroupState::Firing => &mut self.firing,
            AlertGroupState::Acknowledged => &mut self.acknowledged,
            AlertGroupState::Resolved => &mut self.resolved,
            AlertGroupState::Silenced => &mut self.silenced,
        };
        *slot = option;
        Ok(())
    }
}

/// Contents of `additional_settings` for ServiceNow integrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceNowSettings {
    #[serde(default)]
    pub instance_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub state_mapping: ServiceNowStateMapping,
    #[serde(default)]
    pub is_configured: bool,
}

/// Response of `POST /alert_receive_channels/{id}/api_token/`.
///
/// The token is only ever returned once, right after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationTokenResponse {
    pub token: String,
    #[serde(default)]
    pub usage: Option<String>,
}
