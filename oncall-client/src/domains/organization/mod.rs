//! Current organization, reloaded after integration writes.

use oncall_model::Organization;
use std::sync::{Arc, Weak};

use crate::infra::error::ClientResult;
use crate::infra::services::api::OnCallApi;
use crate::infra::store::{Reducer, Store, StoreSubscriber};

#[derive(Debug, Clone, Default)]
pub struct OrganizationState {
    pub current: Option<Organization>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationChange {
    CurrentUpdated,
}

impl Reducer for OrganizationState {
    type Action = Organization;
    type Change = OrganizationChange;

    fn reduce(&mut self, organization: Organization) -> Option<Self::Change> {
        self.current = Some(organization);
        Some(OrganizationChange::CurrentUpdated)
    }
}

#[derive(Debug, Clone)]
pub struct OrganizationStore {
    api: Arc<dyn OnCallApi>,
    state: Arc<Store<OrganizationState>>,
}

impl OrganizationStore {
    pub fn new(api: Arc<dyn OnCallApi>) -> Self {
        Self {
            api,
            state: Arc::new(Store::default()),
        }
    }

    pub async fn load_current_organization(&self) -> ClientResult<Organization> {
        let organization = self.api.current_organization().await?;
        log::debug!("[OrganizationStore] Loaded organization {}", organization.pk);
        self.state.dispatch(organization.clone());
        Ok(organization)
    }

    pub fn current(&self) -> Option<Organization> {
        self.state.read(|state| state.current.clone())
    }

    pub fn subscribe(&self, subscriber: Weak<dyn StoreSubscriber<OrganizationChange>>) {
        self.state.subscribe(subscriber);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::StubOnCallApi;

    #[tokio::test]
    async fn load_replaces_the_cached_organization() {
        let api = StubOnCallApi::new().with_organization(Organization {
            pk: "O1".into(),
            name: Some("Acme".into()),
            stack_slug: None,
            extra: Default::default(),
        });
        let store = OrganizationStore::new(Arc::new(api.clone()));
        assert!(store.current().is_none());

        store.load_current_organization().await.unwrap();
        assert_eq!(store.current().unwrap().name.as_deref(), Some("Acme"));
        assert_eq!(api.call_count("current_organization"), 1);
    }
}
