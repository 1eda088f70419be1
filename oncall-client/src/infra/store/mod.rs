//! Explicit state container with subscribe/notify.
//!
//! State is only mutated through [`Reducer::reduce`], one action at a time
//! under a short write lock. Subscribers are notified after the lock is
//! released so they may read the store from inside the callback.

pub mod notifier;

pub use notifier::StoreNotifier;

use parking_lot::{Mutex, RwLock};
use std::fmt::Debug;
use std::sync::Weak;

/// A piece of state updated by pure reducer steps.
pub trait Reducer: Send + Sync + 'static {
    type Action: Send;
    type Change: Clone + Debug + Send + Sync;

    /// Applies `action`, returning the change to broadcast, or `None` when
    /// the action left the state untouched.
    fn reduce(&mut self, action: Self::Action) -> Option<Self::Change>;
}

/// Trait for components that want to be notified of store changes
pub trait StoreSubscriber<C>: Send + Sync {
    /// Called after each applied change
    fn on_change(&self, change: &C);

    /// Called when a batch of changes completes
    fn on_batch_complete(&self) {}
}

pub struct Store<S: Reducer> {
    state: RwLock<S>,
    subscribers: Mutex<Vec<Weak<dyn StoreSubscriber<S::Change>>>>,
}

impl<S: Reducer + Debug> Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.state.read())
            .field("subscribers", &self.subscribers.lock().len())
            .finish()
    }
}

impl<S: Reducer + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Reducer> Store<S> {
    pub fn new(state: S) -> Self {
        Self {
            state: RwLock::new(state),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to changes. The store only keeps a weak reference.
    pub fn subscribe(&self, subscriber: Weak<dyn StoreSubscriber<S::Change>>) {
        self.subscribers.lock().push(subscriber);
    }

    /// Apply one action and notify subscribers of the resulting change.
    pub fn dispatch(&self, action: S::Action) -> Option<S::Change> {
        let change = self.state.write().reduce(action);
        if let Some(change) = &change {
            self.notify(change);
        }
        change
    }

    /// Apply several actions under one lock, then notify each change
    /// followed by a single batch-complete signal.
    pub fn dispatch_batch(
        &self,
        actions: impl IntoIterator<Item = S::Action>,
    ) -> Vec<S::Change> {
        let changes: Vec<S::Change> = {
            let mut state = self.state.write();
            actions
                .into_iter()
                .filter_map(|action| state.reduce(action))
                .collect()
        };

        if !changes.is_empty() {
            for change in &changes {
                self.notify(change);
            }
            self.notify_batch_complete();
        }
        changes
    }

    /// Read from the current state.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.read())
    }

    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.state.read().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.live_subscribers().len()
    }

    fn live_subscribers(&self) -> Vec<std::sync::Arc<dyn StoreSubscriber<S::Change>>> {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|weak| weak.strong_count() > 0);
        subscribers.iter().filter_map(Weak::upgrade).collect()
    }

    fn notify(&self, change: &S::Change) {
        for subscriber in self.live_subscribers() {
            subscriber.on_change(change);
        }
    }

    fn notify_batch_complete(&self) {
        for subscriber in self.live_subscribers() {
            subscriber.on_batch_complete();
        }
    }
}
