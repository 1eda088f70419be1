//! Loading-state tracking keyed by action.
//!
//! [`auto_loading_state`] wraps an operation so its key reads as loading for
//! exactly as long as the future runs, including when it fails or is dropped.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Actions whose progress consumers may want to reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKey {
    FetchIntegrations,
    UpdateIntegration,
    GenerateServiceNowToken,
    TestServiceNowConnection,
    FetchChannelFilters,
    MoveChannelFilter,
    DeleteChannelFilter,
}

/// Reference-counted loading flags, shared by clones.
#[derive(Debug, Clone, Default)]
pub struct LoaderStore {
    in_flight: Arc<Mutex<HashMap<ActionKey, usize>>>,
}

impl LoaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self, key: ActionKey) -> bool {
        self.in_flight.lock().get(&key).is_some_and(|count| *count > 0)
    }

    /// Marks `key` as loading until the returned guard is dropped.
    pub fn begin(&self, key: ActionKey) -> LoadingGuard {
        *self.in_flight.lock().entry(key).or_insert(0) += 1;
        LoadingGuard {
            loader: self.clone(),
            key,
        }
    }

    fn finish(&self, key: ActionKey) {
        let mut in_flight = self.in_flight.lock();
        if let Some(count) = in_flight.get_mut(&key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                in_flight.remove(&key);
            }
        }
    }
}

#[derive(Debug)]
#[must_use = "the key stops loading as soon as the guard is dropped"]
pub struct LoadingGuard {
    loader: LoaderStore,
    key: ActionKey,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.loader.finish(self.key);
    }
}

/// Runs `operation` with `key` marked as loading.
pub async fn auto_loading_state<F: Future>(
    loader: &LoaderStore,
    key: ActionKey,
    operation: F,
) -> F::Output {
    let _guard = loader.begin(key);
    operation.await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn key_is_loading_while_the_operation_runs() {
        let loader = LoaderStore::new();
        let (tx, rx) = oneshot::channel::<()>();

        let task = {
            let loader = loader.clone();
            tokio::spawn(async move {
                auto_loading_state(&loader, ActionKey::UpdateIntegration, async {
                    let _ = rx.await;
                })
                .await
            })
        };

        tokio::task::yield_now().await;
        while !loader.is_loading(ActionKey::UpdateIntegration) {
            tokio::task::yield_now().await;
        }
        assert!(!loader.is_loading(ActionKey::FetchIntegrations));

        let _ = tx.send(());
        task.await.unwrap();
        assert!(!loader.is_loading(ActionKey::UpdateIntegration));
    }

    #[test]
    fn overlapping_guards_keep_the_key_loading() {
        let loader = LoaderStore::new();
        let first = loader.begin(ActionKey::FetchIntegrations);
        let second = loader.begin(ActionKey::FetchIntegrations);

        drop(first);
        assert!(loader.is_loading(ActionKey::FetchIntegrations));
        drop(second);
        assert!(!loader.is_loading(ActionKey::FetchIntegrations));
    }

    #[tokio::test]
    async fn failure_resets_the_flag() {
        let loader = LoaderStore::new();
        let result: Result<(), &str> =
            auto_loading_state(&loader, ActionKey::GenerateServiceNowToken, async {
                Err("boom")
            })
            .await;
        assert!(result.is_err());
        assert!(!loader.is_loading(ActionKey::GenerateServiceNowToken));
    }
}
