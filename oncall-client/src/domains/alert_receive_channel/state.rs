//! Cached integration data and the reducer that mutates it.

use oncall_model::{
    AlertReceiveChannel, AlertReceiveChannelCounters, AlertReceiveChannelId, AlertTemplates,
    ChannelFilter, ChannelFilterId, ContactPoint, CountersResponse, HeartbeatId,
    IntegrationOption, StatusOption,
};
use std::collections::HashMap;

use super::helpers::move_item;
use crate::infra::store::Reducer;

/// Ids of the last paginated fetch, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginatedSearchResult {
    pub count: Option<u64>,
    pub results: Option<Vec<AlertReceiveChannelId>>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct AlertReceiveChannelState {
    pub search_result: Vec<AlertReceiveChannelId>,
    pub paginated_search_result: PaginatedSearchResult,
    pub items: HashMap<AlertReceiveChannelId, AlertReceiveChannel>,
    pub counters: HashMap<AlertReceiveChannelId, AlertReceiveChannelCounters>,
    /// Integration → channel filter ids in server order
    pub channel_filter_ids: HashMap<AlertReceiveChannelId, Vec<ChannelFilterId>>,
    pub channel_filters: HashMap<ChannelFilterId, ChannelFilter>,
    pub alert_receive_channel_to_heartbeat: HashMap<AlertReceiveChannelId, HeartbeatId>,
    pub alert_receive_channel_options: Vec<IntegrationOption>,
    pub templates: HashMap<AlertReceiveChannelId, AlertTemplates>,
    pub connected_contact_points: HashMap<AlertReceiveChannelId, Vec<ContactPoint>>,
    pub service_now_status_list: Vec<StatusOption>,
}

#[derive(Debug, Clone)]
pub enum AlertReceiveChannelAction {
    /// Shallow-overwrite each item by id, keeping every other cached item
    MergeItems(Vec<AlertReceiveChannel>),
    ReplaceItem(AlertReceiveChannel),
    LinkHeartbeats(Vec<(AlertReceiveChannelId, HeartbeatId)>),
    SetSearchResult(Vec<AlertReceiveChannelId>),
    SetPaginatedResult(PaginatedSearchResult),
    ResetPaginatedResult,
    SetServiceNowStatusList(Vec<StatusOption>),
    ReplaceCounters(CountersResponse),
    MergeCounters(AlertReceiveChannelId, AlertReceiveChannelCounters),
    /// Result of a channel filter fetch for one integration. With
    /// `overwrite`, cached filters of that integration missing from
    /// `filters` are dropped.
    StoreChannelFilters {
        alert_receive_channel: AlertReceiveChannelId,
        filters: Vec<ChannelFilter>,
        overwrite: bool,
    },
    UpsertChannelFilter(ChannelFilter),
    /// Moves `channel_filter` from `from` to `to`; no-op unless it is still
    /// at `from`
    MoveChannelFilter {
        alert_receive_channel: AlertReceiveChannelId,
        channel_filter: ChannelFilterId,
        from: usize,
        to: usize,
    },
    /// Drops the id from its integration's order list; no-op when absent
    RemoveChannelFilterId {
        alert_receive_channel: AlertReceiveChannelId,
        channel_filter: ChannelFilterId,
    },
    RemoveChannelFilter(ChannelFilterId),
    SetIntegrationOptions(Vec<IntegrationOption>),
    SetTemplates(AlertReceiveChannelId, AlertTemplates),
    SetConnectedContactPoints(AlertReceiveChannelId, Vec<ContactPoint>),
}

/// What changed, as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertReceiveChannelChange {
    Items(Vec<AlertReceiveChannelId>),
    HeartbeatLinks(Vec<AlertReceiveChannelId>),
    SearchResult,
    PaginatedResult,
    ServiceNowStatusList,
    /// `None` when the whole counters map was replaced
    Counters(Option<AlertReceiveChannelId>),
    ChannelFilterOrder {
        alert_receive_channel: AlertReceiveChannelId,
        order: Vec<ChannelFilterId>,
    },
    ChannelFilter(ChannelFilterId),
    IntegrationOptions,
    Templates(AlertReceiveChannelId),
    ConnectedContactPoints(AlertReceiveChannelId),
}

impl AlertReceiveChannelState {
    fn order_change(&self, id: &AlertReceiveChannelId) -> AlertReceiveChannelChange {
        AlertReceiveChannelChange::ChannelFilterOrder {
            alert_receive_channel: id.clone(),
            order: self.channel_filter_ids.get(id).cloned().unwrap_or_default(),
        }
    }
}

impl Reducer for AlertReceiveChannelState {
    type Action = AlertReceiveChannelAction;
    type Change = AlertReceiveChannelChange;

    fn reduce(&mut self, action: Self::Action) -> Option<Self::Change> {
        use AlertReceiveChannelAction as A;
        use AlertReceiveChannelChange as C;

        match action {
            A::MergeItems(items) => {
                if items.is_empty() {
                    return None;
                }
                let ids = items.iter().map(|item| item.id.clone()).collect();
                for item in items {
                    self.items.insert(item.id.clone(), item);
                }
                Some(C::Items(ids))
            }
            A::ReplaceItem(item) => {
                let id = item.id.clone();
                self.items.insert(id.clone(), item);
                Some(C::Items(vec![id]))
            }
            A::LinkHeartbeats(links) => {
                if links.is_empty() {
                    return None;
                }
                let ids = links.iter().map(|(id, _)| id.clone()).collect();
                self.alert_receive_channel_to_heartbeat.extend(links);
                Some(C::HeartbeatLinks(ids))
            }
            A::SetSearchResult(ids) => {
                self.search_result = ids;
                Some(C::SearchResult)
            }
            A::SetPaginatedResult(result) => {
                self.paginated_search_result = result;
                Some(C::PaginatedResult)
            }
            A::ResetPaginatedResult => {
                self.paginated_search_result = PaginatedSearchResult::default();
                Some(C::PaginatedResult)
            }
            A::SetServiceNowStatusList(list) => {
                self.service_now_status_list = list;
                Some(C::ServiceNowStatusList)
            }
            A::ReplaceCounters(counters) => {
                self.counters = counters;
                Some(C::Counters(None))
            }
            A::MergeCounters(id, counters) => {
                self.counters.insert(id.clone(), counters);
                Some(C::Counters(Some(id)))
            }
            A::StoreChannelFilters {
                alert_receive_channel,
                filters,
                overwrite,
            } => {
                if overwrite {
                    self.channel_filters
                        .retain(|_, filter| filter.alert_receive_channel != alert_receive_channel);
                }
                let order = filters.iter().map(|filter| filter.id.clone()).collect();
                for filter in filters {
                    self.channel_filters.insert(filter.id.clone(), filter);
                }
                self.channel_filter_ids
                    .insert(alert_receive_channel.clone(), order);
                Some(self.order_change(&alert_receive_channel))
            }
            A::UpsertChannelFilter(filter) => {
                let id = filter.id.clone();
                self.channel_filters.insert(id.clone(), filter);
                Some(C::ChannelFilter(id))
            }
            A::MoveChannelFilter {
                alert_receive_channel,
                channel_filter,
                from,
                to,
            } => {
                let ids = self.channel_filter_ids.get_mut(&alert_receive_channel)?;
                if ids.get(from) != Some(&channel_filter) || !move_item(ids, from, to) {
                    return None;
                }
                Some(self.order_change(&alert_receive_channel))
            }
            A::RemoveChannelFilterId {
                alert_receive_channel,
                channel_filter,
            } => {
                let ids = self.channel_filter_ids.get_mut(&alert_receive_channel)?;
                let index = ids.iter().position(|id| *id == channel_filter)?;
                ids.remove(index);
                Some(self.order_change(&alert_receive_channel))
            }
            A::RemoveChannelFilter(id) => {
                self.channel_filters.remove(&id)?;
                Some(C::ChannelFilter(id))
            }
            A::SetIntegrationOptions(options) => {
                self.alert_receive_channel_options = options;
                Some(C::IntegrationOptions)
            }
            A::SetTemplates(id, templates) => {
                self.templates.insert(id.clone(), templates);
                Some(C::Templates(id))
            }
            A::SetConnectedContactPoints(id, points) => {
                self.connected_contact_points.insert(id.clone(), points);
                Some(C::ConnectedContactPoints(id))
            }
        }
    }
}
