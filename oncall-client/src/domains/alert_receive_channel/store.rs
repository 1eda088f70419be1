use log::{debug, info, warn};
use oncall_model::{
    AlertGroupId, AlertReceiveChannel, AlertReceiveChannelCounters, AlertReceiveChannelCreate,
    AlertReceiveChannelId, AlertReceiveChannelUpdate, AlertTemplates, ChannelFilter,
    ChannelFilterId, ChannelFilterPayload, ContactPoint, CountersResponse, Heartbeat,
    IntegrationOption, IntegrationTokenResponse, StatusOption, flatten_contact_points,
};
use std::sync::{Arc, Weak};

use super::query::{ItemsQuery, PaginatedQuery};
use super::state::{
    AlertReceiveChannelAction as Action, AlertReceiveChannelChange, AlertReceiveChannelState,
    PaginatedSearchResult,
};
use crate::domains::heartbeat::HeartbeatStore;
use crate::domains::organization::OrganizationStore;
use crate::infra::api_client::RequestOptions;
use crate::infra::constants::messages;
use crate::infra::error::{ClientError, ClientResult};
use crate::infra::loader::{ActionKey, LoaderStore, auto_loading_state};
use crate::infra::notifications::{Notifier, with_global_notification};
use crate::infra::services::api::OnCallApi;
use crate::infra::store::{Store, StoreSubscriber};

/// Client-side mirror of integrations and their routes, heartbeats,
/// counters, templates and contact points.
///
/// Every method issues its request first and merges the server response
/// into the cache afterwards, except the channel filter reorder and delete
/// which update the local order list before the request goes out.
#[derive(Debug, Clone)]
pub struct AlertReceiveChannelStore {
    api: Arc<dyn OnCallApi>,
    state: Arc<Store<AlertReceiveChannelState>>,
    heartbeats: HeartbeatStore,
    organization: OrganizationStore,
    loader: LoaderStore,
    notifier: Arc<dyn Notifier>,
    default_page_size: Option<u32>,
}

impl AlertReceiveChannelStore {
    pub fn new(
        api: Arc<dyn OnCallApi>,
        heartbeats: HeartbeatStore,
        organization: OrganizationStore,
        loader: LoaderStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            state: Arc::new(Store::default()),
            heartbeats,
            organization,
            loader,
            notifier,
            default_page_size: None,
        }
    }

    /// `perpage` used when a paginated query does not set one.
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = Some(page_size);
        self
    }

    // === State access ===

    pub fn state(&self) -> &Store<AlertReceiveChannelState> {
        &self.state
    }

    pub fn subscribe(&self, subscriber: Weak<dyn StoreSubscriber<AlertReceiveChannelChange>>) {
        self.state.subscribe(subscriber);
    }

    pub fn item(&self, id: &AlertReceiveChannelId) -> Option<AlertReceiveChannel> {
        self.state.read(|s| s.items.get(id).cloned())
    }

    pub fn search_result(&self) -> Vec<AlertReceiveChannel> {
        self.state.read(|s| {
            s.search_result
                .iter()
                .filter_map(|id| s.items.get(id).cloned())
                .collect()
        })
    }

    pub fn paginated_search_result(&self) -> PaginatedSearchResult {
        self.state.read(|s| s.paginated_search_result.clone())
    }

    pub fn counters(&self, id: &AlertReceiveChannelId) -> Option<AlertReceiveChannelCounters> {
        self.state.read(|s| s.counters.get(id).copied())
    }

    pub fn channel_filter_ids(&self, id: &AlertReceiveChannelId) -> Vec<ChannelFilterId> {
        self.state
            .read(|s| s.channel_filter_ids.get(id).cloned().unwrap_or_default())
    }

    /// Channel filters of an integration in cached order.
    pub fn channel_filters(&self, id: &AlertReceiveChannelId) -> Vec<ChannelFilter> {
        self.state.read(|s| {
            s.channel_filter_ids
                .get(id)
                .into_iter()
                .flatten()
                .filter_map(|fid| s.channel_filters.get(fid).cloned())
                .collect()
        })
    }

    pub fn channel_filter(&self, id: &ChannelFilterId) -> Option<ChannelFilter> {
        self.state.read(|s| s.channel_filters.get(id).cloned())
    }

    /// Heartbeat of an integration, resolved through the cross-reference.
    pub fn heartbeat_for(&self, id: &AlertReceiveChannelId) -> Option<Heartbeat> {
        let heartbeat_id = self
            .state
            .read(|s| s.alert_receive_channel_to_heartbeat.get(id).cloned())?;
        self.heartbeats.get(&heartbeat_id)
    }

    pub fn service_now_status_list(&self) -> Vec<StatusOption> {
        self.state.read(|s| s.service_now_status_list.clone())
    }

    pub fn templates(&self, id: &AlertReceiveChannelId) -> Option<AlertTemplates> {
        self.state.read(|s| s.templates.get(id).cloned())
    }

    pub fn connected_contact_points(&self, id: &AlertReceiveChannelId) -> Vec<ContactPoint> {
        self.state.read(|s| {
            s.connected_contact_points
                .get(id)
                .cloned()
                .unwrap_or_default()
        })
    }

    pub fn alert_receive_channel_options(&self) -> Vec<IntegrationOption> {
        self.state.read(|s| s.alert_receive_channel_options.clone())
    }

    pub fn loader(&self) -> &LoaderStore {
        &self.loader
    }

    // === Integrations ===

    pub async fn create(
        &self,
        data: &AlertReceiveChannelCreate,
        skip_error_handling: bool,
    ) -> ClientResult<AlertReceiveChannel> {
        with_global_notification(
            self.notifier.as_ref(),
            messages::CREATE_INTEGRATION,
            skip_error_handling,
            async {
                let created = self
                    .api
                    .create_alert_receive_channel(data, RequestOptions::skip(skip_error_handling))
                    .await?;
                info!("[AlertReceiveChannelStore] Created integration {}", created.id);
                self.organization.load_current_organization().await?;
                Ok(created)
            },
        )
        .await
    }

    pub async fn update(
        &self,
        id: &AlertReceiveChannelId,
        data: &AlertReceiveChannelUpdate,
        skip_error_handling: bool,
    ) -> ClientResult<AlertReceiveChannel> {
        auto_loading_state(
            &self.loader,
            ActionKey::UpdateIntegration,
            with_global_notification(
                self.notifier.as_ref(),
                messages::UPDATE_INTEGRATION,
                skip_error_handling,
                async {
                    let updated = self
                        .api
                        .update_alert_receive_channel(
                            id,
                            data,
                            RequestOptions::skip(skip_error_handling),
                        )
                        .await?;
                    self.organization.load_current_organization().await?;
                    self.state.dispatch(Action::ReplaceItem(updated.clone()));
                    Ok(updated)
                },
            ),
        )
        .await
    }

    /// Fetches one integration, keeping its embedded heartbeat on the record.
    pub async fn fetch_item_by_id(
        &self,
        id: &AlertReceiveChannelId,
        skip_error_handling: bool,
    ) -> ClientResult<AlertReceiveChannel> {
        let item = self
            .api
            .get_alert_receive_channel(id, RequestOptions::skip(skip_error_handling))
            .await?;

        self.state.dispatch(Action::MergeItems(vec![item.clone()]));
        self.populate_heartbeats(std::slice::from_ref(&item));
        Ok(item)
    }

    pub async fn fetch_items(
        &self,
        query: impl Into<ItemsQuery>,
    ) -> ClientResult<Vec<AlertReceiveChannel>> {
        let query = query.into();
        let page = self
            .api
            .list_alert_receive_channels(&query.to_pairs())
            .await?;
        let results = page.results;

        self.state.dispatch(Action::MergeItems(
            results.iter().map(AlertReceiveChannel::without_heartbeat).collect(),
        ));
        self.populate_heartbeats(&results);
        self.state.dispatch(Action::SetSearchResult(
            results.iter().map(|item| item.id.clone()).collect(),
        ));

        self.refresh_counters().await;
        Ok(results)
    }

    /// Fetches one page of integrations.
    ///
    /// Returns `Ok(None)` without touching any state when the query's
    /// invalidation check fires after the response arrived.
    pub async fn fetch_paginated_items(
        &self,
        query: PaginatedQuery,
    ) -> ClientResult<Option<Vec<AlertReceiveChannel>>> {
        auto_loading_state(&self.loader, ActionKey::FetchIntegrations, async {
            let page = self
                .api
                .list_alert_receive_channels(&query.to_pairs(self.default_page_size))
                .await?;

            if query.is_invalidated() {
                debug!(
                    "[AlertReceiveChannelStore] Discarding stale page {} of integrations",
                    query.page
                );
                return Ok(None);
            }

            let results = page.results;
            self.state.dispatch(Action::MergeItems(
                results.iter().map(AlertReceiveChannel::without_heartbeat).collect(),
            ));
            self.populate_heartbeats(&results);
            self.state
                .dispatch(Action::SetPaginatedResult(PaginatedSearchResult {
                    count: page.count,
                    results: Some(results.iter().map(|item| item.id.clone()).collect()),
                    page_size: page.page_size,
                }));

            if query.should_fetch_counters {
                self.refresh_counters().await;
            }
            Ok(Some(results))
        })
        .await
    }

    pub fn reset_paginated_results(&self) {
        self.state.dispatch(Action::ResetPaginatedResult);
    }

    /// Copies embedded heartbeats into the heartbeat cache and links them
    /// to their integrations. Items without a heartbeat are skipped.
    pub fn populate_heartbeats(&self, items: &[AlertReceiveChannel]) {
        let (heartbeats, links): (Vec<Heartbeat>, Vec<_>) = items
            .iter()
            .filter_map(|item| {
                let heartbeat = item.heartbeat.as_ref()?;
                Some((heartbeat.clone(), (item.id.clone(), heartbeat.id.clone())))
            })
            .unzip();

        self.heartbeats.merge(heartbeats);
        self.state.dispatch(Action::LinkHeartbeats(links));
    }

    pub async fn fetch_alert_receive_channel_options(&self) -> ClientResult<Vec<IntegrationOption>> {
        let options = self.api.integration_options().await?;
        self.state
            .dispatch(Action::SetIntegrationOptions(options.clone()));
        Ok(options)
    }

    /// Saves `payload` over the cached record: name, short description,
    /// source-based resolving and alert group labels are taken from the
    /// cache unless the payload sets them.
    pub async fn save_alert_receive_channel(
        &self,
        id: &AlertReceiveChannelId,
        payload: AlertReceiveChannelUpdate,
    ) -> ClientResult<AlertReceiveChannel> {
        with_global_notification(
            self.notifier.as_ref(),
            messages::SAVE_INTEGRATION,
            false,
            async {
                let current = self
                    .item(id)
                    .ok_or_else(|| ClientError::not_found("alert receive channel", id))?;
                let body = payload.over(&current);
                let saved = self
                    .api
                    .update_alert_receive_channel(id, &body, RequestOptions::default())
                    .await?;
                self.state.dispatch(Action::ReplaceItem(saved.clone()));
                Ok(saved)
            },
        )
        .await
    }

    // === ServiceNow ===

    pub async fn fetch_service_now_status_list(
        &self,
        id: &AlertReceiveChannelId,
        skip_error_handling: bool,
    ) -> ClientResult<Vec<StatusOption>> {
        let list = self
            .api
            .service_now_status_options(id, RequestOptions::skip(skip_error_handling))
            .await?;
        self.state
            .dispatch(Action::SetServiceNowStatusList(list.clone()));
        Ok(list)
    }

    /// `true` only when the token endpoint answers 200. Never notifies.
    pub async fn has_service_now_token(&self, id: &AlertReceiveChannelId) -> bool {
        match self.api.api_token_status(id).await {
            Ok(status) => status == 200,
            Err(err) => {
                debug!("[AlertReceiveChannelStore] No ServiceNow token for {}: {}", id, err);
                false
            }
        }
    }

    /// `true` only when the connection test answers 200.
    pub async fn test_service_now_authentication(&self, data: &AlertReceiveChannelUpdate) -> bool {
        match self.api.test_connection(data).await {
            Ok(status) => status == 200,
            Err(err) => {
                debug!("[AlertReceiveChannelStore] ServiceNow connection test failed: {}", err);
                false
            }
        }
    }

    pub async fn generate_service_now_token(
        &self,
        id: &AlertReceiveChannelId,
        skip_error_handling: bool,
    ) -> ClientResult<IntegrationTokenResponse> {
        with_global_notification(
            self.notifier.as_ref(),
            messages::GENERATE_TOKEN,
            skip_error_handling,
            self.api
                .generate_api_token(id, RequestOptions::skip(skip_error_handling)),
        )
        .await
    }

    // === Channel filters ===

    /// Fetches the routes of one integration. The order list always becomes
    /// the server order; with `overwrite` the integration's cached filters
    /// are replaced instead of merged.
    pub async fn fetch_channel_filters(
        &self,
        id: &AlertReceiveChannelId,
        overwrite: bool,
    ) -> ClientResult<Vec<ChannelFilter>> {
        let filters = auto_loading_state(
            &self.loader,
            ActionKey::FetchChannelFilters,
            self.api.list_channel_filters(id),
        )
        .await?;

        self.state.dispatch(Action::StoreChannelFilters {
            alert_receive_channel: id.clone(),
            filters: filters.clone(),
            overwrite,
        });
        Ok(filters)
    }

    pub async fn create_channel_filter(
        &self,
        id: &AlertReceiveChannelId,
        mut payload: ChannelFilterPayload,
    ) -> ClientResult<ChannelFilter> {
        payload.alert_receive_channel = Some(id.clone());
        let created = self.api.create_channel_filter(&payload).await?;
        self.state
            .dispatch(Action::UpsertChannelFilter(created.clone()));
        self.fetch_channel_filters(id, true).await?;
        Ok(created)
    }

    pub async fn save_channel_filter(
        &self,
        id: &ChannelFilterId,
        payload: &ChannelFilterPayload,
    ) -> ClientResult<ChannelFilter> {
        let saved = self.api.update_channel_filter(id, payload).await?;
        self.state.dispatch(Action::UpsertChannelFilter(saved.clone()));
        Ok(saved)
    }

    /// Moves the route at `old_index` to `new_index`.
    ///
    /// The local order changes before the request is sent. The routes are
    /// refetched with overwrite afterwards whether or not the move succeeded,
    /// so the cache always ends on the server order.
    pub async fn move_channel_filter_to_position(
        &self,
        id: &AlertReceiveChannelId,
        old_index: usize,
        new_index: usize,
    ) -> ClientResult<()> {
        let (channel_filter_id, len) = self.state.read(|s| {
            let ids = s.channel_filter_ids.get(id);
            (
                ids.and_then(|ids| ids.get(old_index)).cloned(),
                ids.map_or(0, Vec::len),
            )
        });
        if len == 0 {
            return Err(ClientError::not_found("channel filter list", id));
        }
        let Some(channel_filter_id) = channel_filter_id else {
            return Err(ClientError::InvalidPosition {
                index: old_index,
                len,
            });
        };
        if new_index >= len {
            return Err(ClientError::InvalidPosition {
                index: new_index,
                len,
            });
        }

        let moved_locally = self.state.dispatch(Action::MoveChannelFilter {
            alert_receive_channel: id.clone(),
            channel_filter: channel_filter_id.clone(),
            from: old_index,
            to: new_index,
        });
        if moved_locally.is_none() {
            return Err(ClientError::StalePosition {
                id: channel_filter_id.to_string(),
                index: old_index,
            });
        }

        let moved = auto_loading_state(
            &self.loader,
            ActionKey::MoveChannelFilter,
            self.api.move_channel_filter(&channel_filter_id, new_index),
        )
        .await;
        if let Err(err) = &moved {
            warn!(
                "[AlertReceiveChannelStore] Moving route {} failed, restoring server order: {}",
                channel_filter_id, err
            );
        }

        let refetched = self.fetch_channel_filters(id, true).await;
        moved?;
        refetched.map(|_| ())
    }

    /// Deletes a route. Its id leaves the order list before the request is
    /// sent; removing an id that is already gone is a no-op.
    pub async fn delete_channel_filter(&self, channel_filter_id: &ChannelFilterId) -> ClientResult<()> {
        let alert_receive_channel = self
            .state
            .read(|s| {
                s.channel_filters
                    .get(channel_filter_id)
                    .map(|filter| filter.alert_receive_channel.clone())
            })
            .ok_or_else(|| ClientError::not_found("channel filter", channel_filter_id))?;

        self.state.dispatch(Action::RemoveChannelFilterId {
            alert_receive_channel: alert_receive_channel.clone(),
            channel_filter: channel_filter_id.clone(),
        });

        let deleted = auto_loading_state(
            &self.loader,
            ActionKey::DeleteChannelFilter,
            self.api.delete_channel_filter(channel_filter_id),
        )
        .await;
        match &deleted {
            Ok(()) => {
                self.state
                    .dispatch(Action::RemoveChannelFilter(channel_filter_id.clone()));
            }
            Err(err) => warn!(
                "[AlertReceiveChannelStore] Deleting route {} failed: {}",
                channel_filter_id, err
            ),
        }

        let refetched = self.fetch_channel_filters(&alert_receive_channel, true).await;
        deleted?;
        refetched.map(|_| ())
    }

    // === Templates, contact points, counters ===

    pub async fn fetch_templates(
        &self,
        id: &AlertReceiveChannelId,
        alert_group_id: Option<&AlertGroupId>,
    ) -> ClientResult<AlertTemplates> {
        let templates = self.api.get_templates(id, alert_group_id).await?;
        self.state
            .dispatch(Action::SetTemplates(id.clone(), templates.clone()));
        Ok(templates)
    }

    pub async fn save_templates(
        &self,
        id: &AlertReceiveChannelId,
        data: &AlertTemplates,
    ) -> ClientResult<AlertTemplates> {
        let templates = self.api.update_templates(id, data).await?;
        self.state
            .dispatch(Action::SetTemplates(id.clone(), templates.clone()));
        Ok(templates)
    }

    pub async fn fetch_connected_contact_points(
        &self,
        id: &AlertReceiveChannelId,
    ) -> ClientResult<Vec<ContactPoint>> {
        let payloads = self.api.connected_contact_points(id).await?;
        let points = flatten_contact_points(&payloads);
        self.state
            .dispatch(Action::SetConnectedContactPoints(id.clone(), points.clone()));
        Ok(points)
    }

    /// Replaces the whole counters map.
    pub async fn fetch_counters(&self) -> ClientResult<CountersResponse> {
        let counters = self.api.counters().await?;
        self.state.dispatch(Action::ReplaceCounters(counters.clone()));
        Ok(counters)
    }

    /// Refreshes the counters of one integration, leaving the others as
    /// they are.
    pub async fn fetch_counters_for_integration(
        &self,
        id: &AlertReceiveChannelId,
    ) -> ClientResult<CountersResponse> {
        let response = self.api.counters_for_integration(id).await?;
        let counters = response.get(id).copied().unwrap_or_default();
        self.state
            .dispatch(Action::MergeCounters(id.clone(), counters));
        Ok(response)
    }

    async fn refresh_counters(&self) {
        if let Err(err) = self.fetch_counters().await {
            warn!("[AlertReceiveChannelStore] Counters refresh failed: {}", err);
        }
    }
}
