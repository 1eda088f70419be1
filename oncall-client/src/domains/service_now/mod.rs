//! Headless ServiceNow configuration flow for one integration.
//!
//! Holds what the configuration drawer edits: the state mapping, the
//! one-time API token and the instance credentials. Nothing is rendered.

use oncall_model::{
    AlertGroupState, AlertReceiveChannel, AlertReceiveChannelId, AlertReceiveChannelUpdate,
    ServiceNowSettings, StatusOption,
};
use serde_json::Value;

use crate::domains::alert_receive_channel::AlertReceiveChannelStore;
use crate::infra::error::{ClientError, ClientResult};
use crate::infra::loader::{ActionKey, auto_loading_state};

/// Instance credentials entered before the connection test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceNowCredentials {
    pub instance_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ServiceNowConfigFlow {
    store: AlertReceiveChannelStore,
    id: AlertReceiveChannelId,
    settings: ServiceNowSettings,
    status_options: Vec<StatusOption>,
    has_token: bool,
    generated_token: Option<String>,
}

impl ServiceNowConfigFlow {
    pub fn new(store: AlertReceiveChannelStore, id: AlertReceiveChannelId) -> Self {
        let settings = store
            .item(&id)
            .and_then(|item| item.service_now_settings())
            .unwrap_or_default();
        Self {
            store,
            id,
            settings,
            status_options: Vec::new(),
            has_token: false,
            generated_token: None,
        }
    }

    /// Fetches the integration's saved settings, the status options and
    /// whether a token already exists.
    pub async fn load(&mut self) -> ClientResult<()> {
        let item = self.store.fetch_item_by_id(&self.id, false).await?;
        self.settings = item.service_now_settings().unwrap_or_default();
        self.status_options = self
            .store
            .fetch_service_now_status_list(&self.id, false)
            .await?;
        self.has_token = self.store.has_service_now_token(&self.id).await;
        log::debug!(
            "[ServiceNowConfigFlow] {} has {} status options, token: {}",
            self.id,
            self.status_options.len(),
            self.has_token
        );
        Ok(())
    }

    pub fn status_options(&self) -> &[StatusOption] {
        &self.status_options
    }

    pub fn settings(&self) -> &ServiceNowSettings {
        &self.settings
    }

    pub fn set_status_mapping(
        &mut self,
        state: AlertGroupState,
        option: Option<StatusOption>,
    ) -> ClientResult<()> {
        self.settings
            .state_mapping
            .set(state, option, &self.status_options)
            .map_err(ClientError::from)
    }

    pub fn set_credentials(&mut self, credentials: ServiceNowCredentials) {
        self.settings.instance_url = Some(credentials.instance_url);
        self.settings.username = Some(credentials.username);
        self.settings.password = Some(credentials.password);
    }

    /// The token generated in this session; the server never returns it again.
    pub fn generated_token(&self) -> Option<&str> {
        self.generated_token.as_deref()
    }

    pub fn token_button_label(&self) -> &'static str {
        if self.has_token || self.generated_token.is_some() {
            "Regenerate"
        } else {
            "Generate"
        }
    }

    pub async fn generate_token(&mut self) -> ClientResult<String> {
        let response = auto_loading_state(
            self.store.loader(),
            ActionKey::GenerateServiceNowToken,
            self.store.generate_service_now_token(&self.id, false),
        )
        .await?;
        self.has_token = true;
        self.generated_token = Some(response.token.clone());
        Ok(response.token)
    }

    pub async fn test_connection(&self, credentials: &ServiceNowCredentials) -> bool {
        let data = AlertReceiveChannelUpdate {
            additional_settings: Some(serde_json::json!({
                "instance_url": credentials.instance_url,
                "username": credentials.username,
                "password": credentials.password,
            })),
            ..Default::default()
        };
        auto_loading_state(
            self.store.loader(),
            ActionKey::TestServiceNowConnection,
            self.store.test_service_now_authentication(&data),
        )
        .await
    }

    /// Writes the credentials and state mapping into `additional_settings`.
    ///
    /// Fields are merged over the stored object; unset values never replace
    /// stored ones.
    pub async fn submit(&mut self) -> ClientResult<AlertReceiveChannel> {
        let mut settings = self.settings.clone();
        settings.is_configured = true;
        let fields = match serde_json::to_value(&settings) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(ClientError::Config(format!(
                    "ServiceNow settings serialized to {}",
                    other
                )));
            }
            Err(e) => {
                return Err(ClientError::Config(format!(
                    "invalid ServiceNow settings: {}",
                    e
                )));
            }
        };

        let mut stored = self
            .store
            .item(&self.id)
            .and_then(|item| item.additional_settings)
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();
        stored.extend(fields.into_iter().filter(|(_, value)| !value.is_null()));
        let additional_settings = Value::Object(stored);

        let updated = self
            .store
            .update(
                &self.id,
                &AlertReceiveChannelUpdate {
                    additional_settings: Some(additional_settings),
                    ..Default::default()
                },
                false,
            )
            .await?;
        self.settings = settings;
        Ok(updated)
    }

    pub fn is_loading(&self) -> bool {
        let loader = self.store.loader();
        loader.is_loading(ActionKey::UpdateIntegration)
            || loader.is_loading(ActionKey::GenerateServiceNowToken)
            || loader.is_loading(ActionKey::TestServiceNowConnection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::heartbeat::HeartbeatStore;
    use crate::domains::organization::OrganizationStore;
    use crate::infra::api_client::RequestOptions;
    use crate::infra::loader::LoaderStore;
    use crate::infra::notifications::NotificationCenter;
    use crate::infra::services::api::OnCallApi;
    use crate::infra::testing::StubOnCallApi;
    use crate::infra::testing::fixtures::{channel, channel_id};
    use oncall_model::Organization;
    use std::sync::Arc;

    fn flow_for(api: StubOnCallApi) -> ServiceNowConfigFlow {
        let api = api.with_organization(Organization {
            pk: "O1".into(),
            name: None,
            stack_slug: None,
            extra: Default::default(),
        });
        let shared: Arc<dyn OnCallApi> = Arc::new(api);
        let store = AlertReceiveChannelStore::new(
            shared.clone(),
            HeartbeatStore::new(),
            OrganizationStore::new(shared),
            LoaderStore::new(),
            Arc::new(NotificationCenter::new()),
        );
        ServiceNowConfigFlow::new(store, channel_id("CH1"))
    }

    fn api() -> StubOnCallApi {
        StubOnCallApi::new()
            .with_channel(channel("CH1", "ServiceNow"))
            .with_status_options(vec![
                ("1".into(), "New".into()),
                ("2".into(), "In Progress".into()),
                ("6".into(), "Resolved".into()),
            ])
    }

    #[tokio::test]
    async fn mapping_only_accepts_loaded_options() {
        let mut flow = flow_for(api());
        flow.load().await.unwrap();

        flow.set_status_mapping(
            AlertGroupState::Resolved,
            Some(("6".into(), "Resolved".into())),
        )
        .unwrap();
        let err = flow
            .set_status_mapping(AlertGroupState::Firing, Some(("9".into(), "Gone".into())))
            .unwrap_err();

        assert!(matches!(err, ClientError::Model(_)));
        assert_eq!(
            flow.settings().state_mapping.get(AlertGroupState::Resolved),
            Some(&("6".to_string(), "Resolved".to_string()))
        );
        assert!(flow.settings().state_mapping.firing.is_none());
    }

    #[tokio::test]
    async fn generating_a_token_flips_the_button_label() {
        let mut flow = flow_for(api());
        flow.load().await.unwrap();
        assert_eq!(flow.token_button_label(), "Generate");

        let token = flow.generate_token().await.unwrap();

        assert_eq!(flow.generated_token(), Some(token.as_str()));
        assert_eq!(flow.token_button_label(), "Regenerate");
        assert!(!flow.is_loading());
    }

    #[tokio::test]
    async fn existing_token_shows_regenerate_after_load() {
        let mut flow = flow_for(api().with_token(channel_id("CH1")));
        flow.load().await.unwrap();
        assert_eq!(flow.token_button_label(), "Regenerate");
        assert!(flow.generated_token().is_none());
    }

    #[tokio::test]
    async fn submit_writes_additional_settings() {
        let mut flow = flow_for(api());
        flow.load().await.unwrap();
        flow.set_credentials(ServiceNowCredentials {
            instance_url: "https://acme.service-now.com".into(),
            username: "oncall".into(),
            password: "hunter2".into(),
        });
        flow.set_status_mapping(
            AlertGroupState::Acknowledged,
            Some(("2".into(), "In Progress".into())),
        )
        .unwrap();

        let updated = flow.submit().await.unwrap();

        let settings = updated.service_now_settings().unwrap();
        assert!(settings.is_configured);
        assert_eq!(settings.username.as_deref(), Some("oncall"));
        assert_eq!(
            settings.state_mapping.acknowledged,
            Some(("2".to_string(), "In Progress".to_string()))
        );
        assert!(!flow.is_loading());
    }

    #[tokio::test]
    async fn submit_keeps_credentials_saved_on_the_server() {
        let mut saved = channel("CH1", "ServiceNow");
        saved.additional_settings = Some(serde_json::json!({
            "instance_url": "https://acme.service-now.com",
            "username": "oncall",
            "password": "hunter2",
            "is_configured": true,
            "sync_interval": 5,
        }));
        let server = StubOnCallApi::new()
            .with_channel(saved)
            .with_status_options(vec![("6".into(), "Resolved".into())]);
        let mut flow = flow_for(server.clone());
        assert!(flow.settings().instance_url.is_none());

        flow.load().await.unwrap();
        assert_eq!(
            flow.settings().instance_url.as_deref(),
            Some("https://acme.service-now.com")
        );
        flow.set_status_mapping(
            AlertGroupState::Resolved,
            Some(("6".into(), "Resolved".into())),
        )
        .unwrap();
        flow.submit().await.unwrap();

        let stored = server
            .get_alert_receive_channel(&channel_id("CH1"), RequestOptions::default())
            .await
            .unwrap();
        let settings = stored.service_now_settings().unwrap();
        assert_eq!(
            settings.instance_url.as_deref(),
            Some("https://acme.service-now.com")
        );
        assert_eq!(settings.username.as_deref(), Some("oncall"));
        assert_eq!(settings.password.as_deref(), Some("hunter2"));
        assert_eq!(
            settings.state_mapping.resolved,
            Some(("6".to_string(), "Resolved".to_string()))
        );
        assert_eq!(
            stored.additional_settings.unwrap()["sync_interval"],
            serde_json::json!(5)
        );
    }

    #[tokio::test]
    async fn connection_test_reports_success() {
        let flow = flow_for(api());
        assert!(flow.test_connection(&ServiceNowCredentials::default()).await);
    }
}
