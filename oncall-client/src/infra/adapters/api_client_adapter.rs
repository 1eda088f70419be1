//! ApiClient adapter that implements the OnCallApi trait

use async_trait::async_trait;
use oncall_model::{
    AlertGroupId, AlertReceiveChannel, AlertReceiveChannelCreate, AlertReceiveChannelId,
    AlertReceiveChannelUpdate, AlertTemplates, ChannelFilter, ChannelFilterId,
    ChannelFilterPayload, ConnectedContactPointsPayload, CountersResponse,
    IntegrationOption, IntegrationTokenResponse, Organization, Page, StatusOption,
};
use std::sync::Arc;

use crate::infra::api_client::{ApiClient, RequestOptions};
use crate::infra::constants::routes::{
    alert_receive_channels, channel_filters, organization, templates,
};
use crate::infra::error::ClientResult;
use crate::infra::services::api::{OnCallApi, QueryPairs};

const NO_QUERY: &[(&str, &str)] = &[];

/// Adapter that implements OnCallApi using the HTTP ApiClient
#[derive(Debug, Clone)]
pub struct ApiClientAdapter {
    client: Arc<ApiClient>,
}

impl ApiClientAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl OnCallApi for ApiClientAdapter {
    async fn create_alert_receive_channel(
        &self,
        data: &AlertReceiveChannelCreate,
        options: RequestOptions,
    ) -> ClientResult<AlertReceiveChannel> {
        self.client
            .post(alert_receive_channels::COLLECTION, data, options)
            .await
    }

    async fn update_alert_receive_channel(
        &self,
        id: &AlertReceiveChannelId,
        data: &AlertReceiveChannelUpdate,
        options: RequestOptions,
    ) -> ClientResult<AlertReceiveChannel> {
        self.client
            .put(&alert_receive_channels::item(id), data, options)
            .await
    }

    async fn get_alert_receive_channel(
        &self,
        id: &AlertReceiveChannelId,
        options: RequestOptions,
    ) -> ClientResult<AlertReceiveChannel> {
        self.client
            .get(&alert_receive_channels::item(id), NO_QUERY, options)
            .await
    }

    async fn list_alert_receive_channels(
        &self,
        query: &QueryPairs,
    ) -> ClientResult<Page<AlertReceiveChannel>> {
        self.client
            .get(
                alert_receive_channels::COLLECTION,
                query.as_slice(),
                RequestOptions::default(),
            )
            .await
    }

    async fn integration_options(&self) -> ClientResult<Vec<IntegrationOption>> {
        self.client
            .get(
                alert_receive_channels::INTEGRATION_OPTIONS,
                NO_QUERY,
                RequestOptions::default(),
            )
            .await
    }

    async fn connected_contact_points(
        &self,
        id: &AlertReceiveChannelId,
    ) -> ClientResult<Vec<ConnectedContactPointsPayload>> {
        self.client
            .get(
                &alert_receive_channels::connected_contact_points(id),
                NO_QUERY,
                RequestOptions::default(),
            )
            .await
    }

    async fn counters(&self) -> ClientResult<CountersResponse> {
        self.client
            .get(
                alert_receive_channels::COUNTERS,
                NO_QUERY,
                RequestOptions::default(),
            )
            .await
    }

    async fn counters_for_integration(
        &self,
        id: &AlertReceiveChannelId,
    ) -> ClientResult<CountersResponse> {
        self.client
            .get(
                &alert_receive_channels::counters(id),
                NO_QUERY,
                RequestOptions::default(),
            )
            .await
    }

    async fn service_now_status_options(
        &self,
        id: &AlertReceiveChannelId,
        options: RequestOptions,
    ) -> ClientResult<Vec<StatusOption>> {
        self.client
            .get(&alert_receive_channels::status_options(id), NO_QUERY, options)
            .await
    }

    async fn api_token_status(&self, id: &AlertReceiveChannelId) -> ClientResult<u16> {
        self.client
            .get_status(&alert_receive_channels::api_token(id), RequestOptions::SILENT)
            .await
    }

    async fn generate_api_token(
        &self,
        id: &AlertReceiveChannelId,
        options: RequestOptions,
    ) -> ClientResult<IntegrationTokenResponse> {
        self.client
            .post(
                &alert_receive_channels::api_token(id),
                &serde_json::json!({}),
                options,
            )
            .await
    }

    async fn test_connection(&self, data: &AlertReceiveChannelUpdate) -> ClientResult<u16> {
        self.client
            .post_status(
                alert_receive_channels::TEST_CONNECTION,
                data,
                RequestOptions::default(),
            )
            .await
    }

    async fn list_channel_filters(
        &self,
        alert_receive_channel: &AlertReceiveChannelId,
    ) -> ClientResult<Vec<ChannelFilter>> {
        self.client
            .get(
                channel_filters::COLLECTION,
                &[("alert_receive_channel", alert_receive_channel.as_str())],
                RequestOptions::default(),
            )
            .await
    }

    async fn create_channel_filter(
        &self,
        data: &ChannelFilterPayload,
    ) -> ClientResult<ChannelFilter> {
        self.client
            .post(channel_filters::COLLECTION, data, RequestOptions::default())
            .await
    }

    async fn update_channel_filter(
        &self,
        id: &ChannelFilterId,
        data: &ChannelFilterPayload,
    ) -> ClientResult<ChannelFilter> {
        self.client
            .put(&channel_filters::item(id), data, RequestOptions::default())
            .await
    }

    async fn move_channel_filter(
        &self,
        id: &ChannelFilterId,
        position: usize,
    ) -> ClientResult<()> {
        self.client
            .put_no_content(
                &channel_filters::move_to_position(id, position),
                RequestOptions::default(),
            )
            .await
    }

    async fn delete_channel_filter(&self, id: &ChannelFilterId) -> ClientResult<()> {
        self.client
            .delete(&channel_filters::item(id), RequestOptions::default())
            .await
    }

    async fn get_templates(
        &self,
        id: &AlertReceiveChannelId,
        alert_group_id: Option<&AlertGroupId>,
    ) -> ClientResult<AlertTemplates> {
        let query: Vec<(&str, &str)> = alert_group_id
            .map(|group| vec![("alert_group_id", group.as_str())])
            .unwrap_or_default();
        self.client
            .get(&templates::item(id), query.as_slice(), RequestOptions::default())
            .await
    }

    async fn update_templates(
        &self,
        id: &AlertReceiveChannelId,
        data: &AlertTemplates,
    ) -> ClientResult<AlertTemplates> {
        self.client
            .put(&templates::item(id), data, RequestOptions::default())
            .await
    }

    async fn current_organization(&self) -> ClientResult<Organization> {
        self.client
            .get(organization::CURRENT, NO_QUERY, RequestOptions::default())
            .await
    }
}
