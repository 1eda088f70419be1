//! Query parameters for the integration list endpoint.

use std::fmt;

use crate::infra::services::api::QueryPairs;

/// Filters accepted by `GET /alert_receive_channels/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationFilters {
    pub search: Option<String>,
    pub integration: Vec<String>,
    pub integration_ne: Vec<String>,
    pub team: Vec<String>,
    pub label: Vec<String>,
    pub id_ne: Vec<String>,
    /// Any other server-side filter, sent verbatim
    pub extra: QueryPairs,
}

impl IntegrationFilters {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        let repeated = [
            ("integration", &self.integration),
            ("integration_ne", &self.integration_ne),
            ("team", &self.team),
            ("label", &self.label),
            ("id_ne", &self.id_ne),
        ];
        for (key, values) in repeated {
            pairs.extend(values.iter().map(|value| (key.to_string(), value.clone())));
        }
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

/// Query for a non-paginated fetch: a bare search term or full filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemsQuery {
    Search(String),
    Filters(IntegrationFilters),
}

impl Default for ItemsQuery {
    fn default() -> Self {
        ItemsQuery::Search(String::new())
    }
}

impl ItemsQuery {
    pub fn to_pairs(&self) -> QueryPairs {
        match self {
            ItemsQuery::Search(term) => vec![("search".to_string(), term.clone())],
            ItemsQuery::Filters(filters) => filters.to_pairs(),
        }
    }
}

impl From<&str> for ItemsQuery {
    fn from(term: &str) -> Self {
        ItemsQuery::Search(term.to_string())
    }
}

impl From<String> for ItemsQuery {
    fn from(term: String) -> Self {
        ItemsQuery::Search(term)
    }
}

impl From<IntegrationFilters> for ItemsQuery {
    fn from(filters: IntegrationFilters) -> Self {
        ItemsQuery::Filters(filters)
    }
}

/// Checked after the response arrives; `true` discards the page.
pub type InvalidateFn = Box<dyn Fn() -> bool + Send + Sync>;

/// Query for one page of integrations.
pub struct PaginatedQuery {
    pub filters: IntegrationFilters,
    pub page: u32,
    pub per_page: Option<u32>,
    pub should_fetch_counters: bool,
    pub invalidate: Option<InvalidateFn>,
}

impl fmt::Debug for PaginatedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedQuery")
            .field("filters", &self.filters)
            .field("page", &self.page)
            .field("per_page", &self.per_page)
            .field("should_fetch_counters", &self.should_fetch_counters)
            .field("invalidate", &self.invalidate.is_some())
            .finish()
    }
}

impl Default for PaginatedQuery {
    fn default() -> Self {
        Self::new(IntegrationFilters::default())
    }
}

impl PaginatedQuery {
    pub fn new(filters: IntegrationFilters) -> Self {
        Self {
            filters,
            page: 1,
            per_page: None,
            should_fetch_counters: false,
            invalidate: None,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_counters(mut self) -> Self {
        self.should_fetch_counters = true;
        self
    }

    pub fn invalidate_when(mut self, invalidate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.invalidate = Some(Box::new(invalidate));
        self
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidate.as_ref().is_some_and(|invalidate| invalidate())
    }

    pub fn to_pairs(&self, default_per_page: Option<u32>) -> QueryPairs {
        let mut pairs = self.filters.to_pairs();
        pairs.push(("page".to_string(), self.page.to_string()));
        if let Some(per_page) = self.per_page.or(default_per_page) {
            pairs.push(("perpage".to_string(), per_page.to_string()));
        }
        pairs
    }
}
