//! API service trait
//!
//! Stores talk to the server only through [`OnCallApi`], so tests can swap
//! the HTTP adapter for an in-memory implementation.

use async_trait::async_trait;
use oncall_model::{
    AlertGroupId, AlertReceiveChannel, AlertReceiveChannelCreate, AlertReceiveChannelId,
    AlertReceiveChannelUpdate, AlertTemplates, ChannelFilter, ChannelFilterId,
    ChannelFilterPayload, ConnectedContactPointsPayload, CountersResponse,
    IntegrationOption, IntegrationTokenResponse, Organization, Page, StatusOption,
};
use std::fmt::Debug;

use crate::infra::api_client::RequestOptions;
use crate::infra::error::ClientResult;

/// Query string pairs for collection endpoints.
pub type QueryPairs = Vec<(String, String)>;

#[async_trait]
pub trait OnCallApi: Send + Sync + Debug {
    // === Integrations ===

    async fn create_alert_receive_channel(
        &self,
        data: &AlertReceiveChannelCreate,
        options: RequestOptions,
    ) -> ClientResult<AlertReceiveChannel>;

    async fn update_alert_receive_channel(
        &self,
        id: &AlertReceiveChannelId,
        data: &AlertReceiveChannelUpdate,
        options: RequestOptions,
    ) -> ClientResult<AlertReceiveChannel>;

    async fn get_alert_receive_channel(
        &self,
        id: &AlertReceiveChannelId,
        options: RequestOptions,
    ) -> ClientResult<AlertReceiveChannel>;

    /// `GET /alert_receive_channels/` with arbitrary filters, `page` and `perpage`.
    async fn list_alert_receive_channels(
        &self,
        query: &QueryPairs,
    ) -> ClientResult<Page<AlertReceiveChannel>>;

    async fn integration_options(&self) -> ClientResult<Vec<IntegrationOption>>;

    async fn connected_contact_points(
        &self,
        id: &AlertReceiveChannelId,
    ) -> ClientResult<Vec<ConnectedContactPointsPayload>>;

    async fn counters(&self) -> ClientResult<CountersResponse>;

    async fn counters_for_integration(
        &self,
        id: &AlertReceiveChannelId,
    ) -> ClientResult<CountersResponse>;

    // === ServiceNow ===

    async fn service_now_status_options(
        &self,
        id: &AlertReceiveChannelId,
        options: RequestOptions,
    ) -> ClientResult<Vec<StatusOption>>;

    /// Status code of `GET .../api_token/`; never notifies.
    async fn api_token_status(&self, id: &AlertReceiveChannelId) -> ClientResult<u16>;

    async fn generate_api_token(
        &self,
        id: &AlertReceiveChannelId,
        options: RequestOptions,
    ) -> ClientResult<IntegrationTokenResponse>;

    /// Status code of `POST /alert_receive_channels/test_connection/`.
    async fn test_connection(&self, data: &AlertReceiveChannelUpdate) -> ClientResult<u16>;

    // === Channel filters ===

    async fn list_channel_filters(
        &self,
        alert_receive_channel: &AlertReceiveChannelId,
    ) -> ClientResult<Vec<ChannelFilter>>;

    async fn create_channel_filter(
        &self,
        data: &ChannelFilterPayload,
    ) -> ClientResult<ChannelFilter>;

    async fn update_channel_filter(
        &self,
        id: &ChannelFilterId,
        data: &ChannelFilterPayload,
    ) -> ClientResult<ChannelFilter>;

    async fn move_channel_filter(&self, id: &ChannelFilterId, position: usize)
    -> ClientResult<()>;

    async fn delete_channel_filter(&self, id: &ChannelFilterId) -> ClientResult<()>;

    // === Templates ===

    async fn get_templates(
        &self,
        id: &AlertReceiveChannelId,
        alert_group_id: Option<&AlertGroupId>,
    ) -> ClientResult<AlertTemplates>;

    async fn update_templates(
        &self,
        id: &AlertReceiveChannelId,
        data: &AlertTemplates,
    ) -> ClientResult<AlertTemplates>;

    // === Organization ===

    async fn current_organization(&self) -> ClientResult<Organization>;
}
