//! Root store wiring every domain store to one API service.

use oncall_model::AlertReceiveChannelId;
use std::sync::Arc;

use crate::domains::alert_receive_channel::AlertReceiveChannelStore;
use crate::domains::heartbeat::HeartbeatStore;
use crate::domains::organization::OrganizationStore;
use crate::domains::service_now::ServiceNowConfigFlow;
use crate::infra::adapters::ApiClientAdapter;
use crate::infra::api_client::ApiClient;
use crate::infra::config::ClientConfig;
use crate::infra::error::ClientResult;
use crate::infra::loader::LoaderStore;
use crate::infra::notifications::Notifier;
use crate::infra::services::api::OnCallApi;

#[derive(Debug, Clone)]
pub struct RootStore {
    pub alert_receive_channel_store: AlertReceiveChannelStore,
    pub heartbeat_store: HeartbeatStore,
    pub organization_store: OrganizationStore,
    pub loader_store: LoaderStore,
}

impl RootStore {
    pub fn new(api: Arc<dyn OnCallApi>, notifier: Arc<dyn Notifier>) -> Self {
        let heartbeat_store = HeartbeatStore::new();
        let organization_store = OrganizationStore::new(api.clone());
        let loader_store = LoaderStore::new();
        let alert_receive_channel_store = AlertReceiveChannelStore::new(
            api,
            heartbeat_store.clone(),
            organization_store.clone(),
            loader_store.clone(),
            notifier,
        );

        Self {
            alert_receive_channel_store,
            heartbeat_store,
            organization_store,
            loader_store,
        }
    }

    /// Builds the HTTP client from `config` and wires the stores to it.
    pub fn from_config(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let client = ApiClient::new(config, notifier.clone())?;
        let api: Arc<dyn OnCallApi> = Arc::new(ApiClientAdapter::new(Arc::new(client)));
        let mut root = Self::new(api, notifier);
        root.alert_receive_channel_store = root
            .alert_receive_channel_store
            .with_default_page_size(config.page_size);
        Ok(root)
    }

    pub fn service_now_flow(&self, id: AlertReceiveChannelId) -> ServiceNowConfigFlow {
        ServiceNowConfigFlow::new(self.alert_receive_channel_store.clone(), id)
    }
}
