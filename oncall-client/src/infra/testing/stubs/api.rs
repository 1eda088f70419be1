use async_trait::async_trait;
use oncall_model::{
    AlertGroupId, AlertReceiveChannel, AlertReceiveChannelCounters, AlertReceiveChannelCreate,
    AlertReceiveChannelId, AlertReceiveChannelUpdate, AlertTemplates, ChannelFilter,
    ChannelFilterId, ChannelFilterPayload, ConnectedContactPointsPayload, CountersResponse,
    IntegrationOption, IntegrationTokenResponse, Organization, Page, StatusOption,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::infra::api_client::RequestOptions;
use crate::infra::error::{ClientError, ClientResult};
use crate::infra::services::api::{OnCallApi, QueryPairs};

/// In-memory OnCall server.
///
/// Every call yields once before answering so concurrent store calls
/// interleave the way real network round trips do.
#[derive(Debug, Clone, Default)]
pub struct StubOnCallApi {
    inner: Arc<RwLock<InnerState>>,
}

#[derive(Debug, Default)]
struct InnerState {
    channels: Vec<AlertReceiveChannel>,
    filters: BTreeMap<AlertReceiveChannelId, Vec<ChannelFilter>>,
    counters: CountersResponse,
    templates: HashMap<AlertReceiveChannelId, AlertTemplates>,
    contact_points: HashMap<AlertReceiveChannelId, Vec<ConnectedContactPointsPayload>>,
    options: Vec<IntegrationOption>,
    status_options: Vec<StatusOption>,
    tokens: HashSet<AlertReceiveChannelId>,
    organization: Option<Organization>,
    calls: Vec<String>,
    failing: HashSet<&'static str>,
    ignore_moves: bool,
    next_id: u32,
    while_listing: ListHook,
}

/// Runs while a list request is in flight, before the response is returned.
#[derive(Clone, Default)]
struct ListHook(Option<Arc<dyn Fn() + Send + Sync>>);

impl std::fmt::Debug for ListHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.0.is_some() { "ListHook(set)" } else { "ListHook(none)" })
    }
}

impl StubOnCallApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(self, channel: AlertReceiveChannel) -> Self {
        self.inner.write().channels.push(channel);
        self
    }

    pub fn with_filters(self, filters: Vec<ChannelFilter>) -> Self {
        {
            let mut inner = self.inner.write();
            for filter in filters {
                inner
                    .filters
                    .entry(filter.alert_receive_channel.clone())
                    .or_default()
                    .push(filter);
            }
        }
        self
    }

    pub fn with_counters(self, id: AlertReceiveChannelId, alerts: u64, groups: u64) -> Self {
        self.inner.write().counters.insert(
            id,
            AlertReceiveChannelCounters {
                alerts_count: alerts,
                alert_groups_count: groups,
            },
        );
        self
    }

    pub fn with_integration_options(self, options: Vec<IntegrationOption>) -> Self {
        self.inner.write().options = options;
        self
    }

    pub fn with_status_options(self, options: Vec<StatusOption>) -> Self {
        self.inner.write().status_options = options;
        self
    }

    pub fn with_token(self, id: AlertReceiveChannelId) -> Self {
        self.inner.write().tokens.insert(id);
        self
    }

    pub fn with_contact_points(
        self,
        id: AlertReceiveChannelId,
        payloads: Vec<ConnectedContactPointsPayload>,
    ) -> Self {
        self.inner.write().contact_points.insert(id, payloads);
        self
    }

    pub fn with_organization(self, organization: Organization) -> Self {
        self.inner.write().organization = Some(organization);
        self
    }

    /// Makes every call to `operation` fail with a 500.
    pub fn fail(&self, operation: &'static str) {
        self.inner.write().failing.insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.inner.write().failing.remove(operation);
    }

    /// Accept move requests without reordering, so the server order
    /// disagrees with an optimistic local move.
    pub fn ignore_moves(&self) {
        self.inner.write().ignore_moves = true;
    }

    /// Runs `hook` inside every integration list request, after it was
    /// received and before the page is returned.
    pub fn while_listing(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.inner.write().while_listing = ListHook(Some(Arc::new(hook)));
    }

    pub fn set_counters(&self, id: AlertReceiveChannelId, alerts: u64, groups: u64) {
        self.inner.write().counters.insert(
            id,
            AlertReceiveChannelCounters {
                alerts_count: alerts,
                alert_groups_count: groups,
            },
        );
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.read().calls.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.inner
            .read()
            .calls
            .iter()
            .filter(|call| call.split(' ').next() == Some(operation))
            .count()
    }

    pub fn server_filter_order(&self, id: &AlertReceiveChannelId) -> Vec<ChannelFilterId> {
        self.inner
            .read()
            .filters
            .get(id)
            .map(|filters| filters.iter().map(|f| f.id.clone()).collect())
            .unwrap_or_default()
    }

    async fn call(&self, operation: &'static str, detail: impl std::fmt::Display) -> ClientResult<()> {
        self.inner
            .write()
            .calls
            .push(format!("{} {}", operation, detail).trim_end().to_string());
        tokio::task::yield_now().await;
        if self.inner.read().failing.contains(operation) {
            return Err(ClientError::Status {
                status: 500,
                message: format!("{} failed", operation),
            });
        }
        Ok(())
    }

    fn channel(&self, id: &AlertReceiveChannelId) -> ClientResult<AlertReceiveChannel> {
        self.inner
            .read()
            .channels
            .iter()
            .find(|channel| &channel.id == id)
            .cloned()
            .ok_or_else(|| ClientError::Status {
                status: 404,
                message: "Not found.".into(),
            })
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        format!("{}{}", prefix, inner.next_id)
    }
}

fn apply_update(channel: &mut AlertReceiveChannel, data: &AlertReceiveChannelUpdate) {
    if let Some(name) = &data.verbal_name {
        channel.verbal_name = name.clone();
    }
    if let Some(description) = &data.description_short {
        channel.description_short = description.clone();
    }
    if let Some(description) = &data.description {
        channel.description = Some(description.clone());
    }
    if let Some(team) = &data.team {
        channel.team = Some(team.clone());
    }
    if let Some(allow) = data.allow_source_based_resolving {
        channel.allow_source_based_resolving = allow;
    }
    if let Some(labels) = &data.alert_group_labels {
        channel.alert_group_labels = labels.clone();
    }
    if let Some(labels) = &data.labels {
        channel.labels = labels.clone();
    }
    if let Some(settings) = &data.additional_settings {
        channel.additional_settings = Some(settings.clone());
    }
}

#[async_trait]
impl OnCallApi for StubOnCallApi {
    async fn create_alert_receive_channel(
        &self,
        data: &AlertReceiveChannelCreate,
        _options: RequestOptions,
    ) -> ClientResult<AlertReceiveChannel> {
        self.call("create_alert_receive_channel", &data.integration).await?;
        let id = AlertReceiveChannelId::new(self.next_id("CH"))?;
        let channel: AlertReceiveChannel = serde_json::from_value(serde_json::json!({
            "id": id,
            "integration": data.integration,
            "verbal_name": data.verbal_name,
            "description_short": data.description_short,
        }))
        .map_err(|source| ClientError::Decode {
            url: "stub".into(),
            source,
        })?;
        self.inner.write().channels.push(channel.clone());
        Ok(channel)
    }

    async fn update_alert_receive_channel(
        &self,
        id: &AlertReceiveChannelId,
        data: &AlertReceiveChannelUpdate,
        _options: RequestOptions,
    ) -> ClientResult<AlertReceiveChannel> {
        self.call("update_alert_receive_channel", id).await?;
        let mut inner = self.inner.write();
        let channel = inner
            .channels
            .iter_mut()
            .find(|channel| &channel.id == id)
            .ok_or_else(|| ClientError::Status {
                status: 404,
                message: "Not found.".into(),
            })?;
        apply_update(channel, data);
        Ok(channel.clone())
    }

    async fn get_alert_receive_channel(
        &self,
        id: &AlertReceiveChannelId,
        _options: RequestOptions,
    ) -> ClientResult<AlertReceiveChannel> {
        self.call("get_alert_receive_channel", id).await?;
        self.channel(id)
    }

    async fn list_alert_receive_channels(
        &self,
        query: &QueryPairs,
    ) -> ClientResult<Page<AlertReceiveChannel>> {
        let rendered: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.call("list_alert_receive_channels", rendered.join("&"))
            .await?;
        let hook = self.inner.read().while_listing.0.clone();
        if let Some(hook) = hook {
            hook();
        }

        let search = query
            .iter()
            .find(|(key, _)| key == "search")
            .map(|(_, value)| value.to_lowercase());
        let results: Vec<AlertReceiveChannel> = self
            .inner
            .read()
            .channels
            .iter()
            .filter(|channel| match &search {
                Some(term) => channel.display_name().to_lowercase().contains(term),
                None => true,
            })
            .cloned()
            .collect();

        let per_page = query
            .iter()
            .find(|(key, _)| key == "perpage")
            .and_then(|(_, value)| value.parse::<usize>().ok());
        let page = query
            .iter()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse::<usize>().ok())
            .unwrap_or(1);

        match per_page {
            Some(per_page) if per_page > 0 => {
                let count = results.len();
                let slice: Vec<_> = results
                    .into_iter()
                    .skip((page.saturating_sub(1)) * per_page)
                    .take(per_page)
                    .collect();
                Ok(Page {
                    count: Some(count as u64),
                    results: slice,
                    page_size: Some(per_page as u64),
                    current_page_number: Some(page as u64),
                    total_pages: Some(count.div_ceil(per_page) as u64),
                    next: None,
                    previous: None,
                })
            }
            _ => Ok(Page::single(results)),
        }
    }

    async fn integration_options(&self) -> ClientResult<Vec<IntegrationOption>> {
        self.call("integration_options", "").await?;
        Ok(self.inner.read().options.clone())
    }

    async fn connected_contact_points(
        &self,
        id: &AlertReceiveChannelId,
    ) -> ClientResult<Vec<ConnectedContactPointsPayload>> {
        self.call("connected_contact_points", id).await?;
        Ok(self
            .inner
            .read()
            .contact_points
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    async fn counters(&self) -> ClientResult<CountersResponse> {
        self.call("counters", "").await?;
        Ok(self.inner.read().counters.clone())
    }

    async fn counters_for_integration(
        &self,
        id: &AlertReceiveChannelId,
    ) -> ClientResult<CountersResponse> {
        self.call("counters_for_integration", id).await?;
        let counters = self.inner.read().counters.get(id).copied().unwrap_or_default();
        Ok(CountersResponse::from([(id.clone(), counters)]))
    }

    async fn service_now_status_options(
        &self,
        id: &AlertReceiveChannelId,
        _options: RequestOptions,
    ) -> ClientResult<Vec<StatusOption>> {
        self.call("service_now_status_options", id).await?;
        Ok(self.inner.read().status_options.clone())
    }

    async fn api_token_status(&self, id: &AlertReceiveChannelId) -> ClientResult<u16> {
        self.call("api_token_status", id).await?;
        if self.inner.read().tokens.contains(id) {
            Ok(200)
        } else {
            Err(ClientError::Status {
                status: 404,
                message: "Not found.".into(),
            })
        }
    }

    async fn generate_api_token(
        &self,
        id: &AlertReceiveChannelId,
        _options: RequestOptions,
    ) -> ClientResult<IntegrationTokenResponse> {
        self.call("generate_api_token", id).await?;
        let token = self.next_id("token-");
        self.inner.write().tokens.insert(id.clone());
        Ok(IntegrationTokenResponse { token, usage: None })
    }

    async fn test_connection(&self, _data: &AlertReceiveChannelUpdate) -> ClientResult<u16> {
        self.call("test_connection", "").await?;
        Ok(200)
    }

    async fn list_channel_filters(
        &self,
        alert_receive_channel: &AlertReceiveChannelId,
    ) -> ClientResult<Vec<ChannelFilter>> {
        self.call("list_channel_filters", alert_receive_channel).await?;
        Ok(self
            .inner
            .read()
            .filters
            .get(alert_receive_channel)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_channel_filter(
        &self,
        data: &ChannelFilterPayload,
    ) -> ClientResult<ChannelFilter> {
        self.call("create_channel_filter", "").await?;
        let channel = data.alert_receive_channel.clone().ok_or_else(|| ClientError::Status {
            status: 400,
            message: "alert_receive_channel: This field is required.".into(),
        })?;
        let id = ChannelFilterId::new(self.next_id("R"))?;

        let mut inner = self.inner.write();
        let filters = inner.filters.entry(channel.clone()).or_default();
        let filter = ChannelFilter {
            id,
            alert_receive_channel: channel,
            order: filters.len() as u32,
            filtering_term: data.filtering_term.clone(),
            filtering_term_type: data.filtering_term_type,
            is_default: false,
            escalation_chain: data.escalation_chain.clone(),
            extra: Default::default(),
        };
        // The default route stays last.
        let position = filters
            .iter()
            .position(|f| f.is_default)
            .unwrap_or(filters.len());
        filters.insert(position, filter.clone());
        Ok(filter)
    }

    async fn update_channel_filter(
        &self,
        id: &ChannelFilterId,
        data: &ChannelFilterPayload,
    ) -> ClientResult<ChannelFilter> {
        self.call("update_channel_filter", id).await?;
        let mut inner = self.inner.write();
        let filter = inner
            .filters
            .values_mut()
            .flat_map(|filters| filters.iter_mut())
            .find(|filter| &filter.id == id)
            .ok_or_else(|| ClientError::Status {
                status: 404,
                message: "Not found.".into(),
            })?;
        if let Some(term) = &data.filtering_term {
            filter.filtering_term = Some(term.clone());
        }
        if let Some(kind) = data.filtering_term_type {
            filter.filtering_term_type = Some(kind);
        }
        if let Some(chain) = &data.escalation_chain {
            filter.escalation_chain = Some(chain.clone());
        }
        Ok(filter.clone())
    }

    async fn move_channel_filter(
        &self,
        id: &ChannelFilterId,
        position: usize,
    ) -> ClientResult<()> {
        self.call("move_channel_filter", format!("{id} {position}"))
            .await?;
        let mut inner = self.inner.write();
        if inner.ignore_moves {
            return Ok(());
        }
        for filters in inner.filters.values_mut() {
            if let Some(from) = filters.iter().position(|f| &f.id == id) {
                let filter = filters.remove(from);
                let to = position.min(filters.len());
                filters.insert(to, filter);
                for (order, filter) in filters.iter_mut().enumerate() {
                    filter.order = order as u32;
                }
                return Ok(());
            }
        }
        Err(ClientError::Status {
            status: 404,
            message: "Not found.".into(),
        })
    }

    async fn delete_channel_filter(&self, id: &ChannelFilterId) -> ClientResult<()> {
        self.call("delete_channel_filter", id).await?;
        let mut inner = self.inner.write();
        for filters in inner.filters.values_mut() {
            if let Some(index) = filters.iter().position(|f| &f.id == id) {
                filters.remove(index);
                return Ok(());
            }
        }
        Err(ClientError::Status {
            status: 404,
            message: "Not found.".into(),
        })
    }

    async fn get_templates(
        &self,
        id: &AlertReceiveChannelId,
        alert_group_id: Option<&AlertGroupId>,
    ) -> ClientResult<AlertTemplates> {
        let detail = match alert_group_id {
            Some(group) => format!("{id} {group}"),
            None => id.to_string(),
        };
        self.call("get_templates", detail).await?;
        Ok(self.inner.read().templates.get(id).cloned().unwrap_or_default())
    }

    async fn update_templates(
        &self,
        id: &AlertReceiveChannelId,
        data: &AlertTemplates,
    ) -> ClientResult<AlertTemplates> {
        self.call("update_templates", id).await?;
        let mut inner = self.inner.write();
        let stored = inner.templates.entry(id.clone()).or_default();
        for (name, body) in &data.0 {
            stored.0.insert(name.clone(), body.clone());
        }
        Ok(stored.clone())
    }

    async fn current_organization(&self) -> ClientResult<Organization> {
        self.call("current_organization", "").await?;
        self.inner
            .read()
            .organization
            .clone()
            .ok_or_else(|| ClientError::Status {
                status: 404,
                message: "Not found.".into(),
            })
    }
}
