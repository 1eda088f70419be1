//! Heartbeat cache fed from integration fetches.

use oncall_model::{Heartbeat, HeartbeatId};
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use crate::infra::store::{Reducer, Store, StoreSubscriber};

#[derive(Debug, Clone, Default)]
pub struct HeartbeatState {
    pub items: HashMap<HeartbeatId, Heartbeat>,
}

#[derive(Debug, Clone)]
pub enum HeartbeatAction {
    Merge(Vec<Heartbeat>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeartbeatChange {
    Merged(Vec<HeartbeatId>),
}

impl Reducer for HeartbeatState {
    type Action = HeartbeatAction;
    type Change = HeartbeatChange;

    fn reduce(&mut self, action: Self::Action) -> Option<Self::Change> {
        match action {
            HeartbeatAction::Merge(heartbeats) => {
                if heartbeats.is_empty() {
                    return None;
                }
                let ids = heartbeats.iter().map(|hb| hb.id.clone()).collect();
                for heartbeat in heartbeats {
                    self.items.insert(heartbeat.id.clone(), heartbeat);
                }
                Some(HeartbeatChange::Merged(ids))
            }
        }
    }
}

/// Merge-only heartbeat cache, shared by clones.
#[derive(Debug, Clone, Default)]
pub struct HeartbeatStore {
    state: Arc<Store<HeartbeatState>>,
}

impl HeartbeatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&self, heartbeats: Vec<Heartbeat>) {
        self.state.dispatch(HeartbeatAction::Merge(heartbeats));
    }

    pub fn get(&self, id: &HeartbeatId) -> Option<Heartbeat> {
        self.state.read(|state| state.items.get(id).cloned())
    }

    pub fn len(&self) -> usize {
        self.state.read(|state| state.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self, subscriber: Weak<dyn StoreSubscriber<HeartbeatChange>>) {
        self.state.subscribe(subscriber);
    }

    pub fn state(&self) -> &Store<HeartbeatState> {
        &self.state
    }
}
