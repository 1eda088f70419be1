use parking_lot::Mutex;
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::StoreSubscriber;

/// Subscriber that flags pending changes for consumers that poll instead of
/// reacting to every callback.
#[derive(Debug, Clone)]
pub struct StoreNotifier {
    /// Flag indicating consumers need to re-read the store
    needs_refresh: Arc<AtomicBool>,
    /// Last time a refresh was handed out (for debouncing)
    last_refresh_time: Arc<Mutex<Option<Instant>>>,
    debounce: Duration,
}

impl Default for StoreNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreNotifier {
    /// Create a new notifier with default 100ms debounce
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(100))
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            needs_refresh: Arc::new(AtomicBool::new(false)),
            last_refresh_time: Arc::new(Mutex::new(None)),
            debounce,
        }
    }

    /// Returns true at most once per debounce window while changes are pending.
    pub fn should_refresh(&self) -> bool {
        if !self.needs_refresh.load(Ordering::Acquire) {
            return false;
        }

        let mut last = self.last_refresh_time.lock();
        if let Some(last_time) = *last
            && last_time.elapsed() < self.debounce
        {
            return false;
        }

        self.needs_refresh.store(false, Ordering::Release);
        *last = Some(Instant::now());
        true
    }

    pub fn mark_needs_refresh(&self) {
        self.needs_refresh.store(true, Ordering::Release);
    }
}

impl<C: Debug> StoreSubscriber<C> for StoreNotifier {
    fn on_change(&self, change: &C) {
        log::trace!("[StoreNotifier] change: {:?}", change);
        self.mark_needs_refresh();
    }
}
