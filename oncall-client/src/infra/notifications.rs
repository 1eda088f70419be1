//! Centralized notification layer.
//!
//! Failures that are not explicitly suppressed end up here, either from the
//! HTTP client (normalized server error) or from [`with_global_notification`]
//! (operation-specific success/failure text).

use parking_lot::RwLock;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use crate::infra::error::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications
pub trait Notifier: Send + Sync + Debug {
    fn notify(&self, notification: Notification);
}

/// Success/failure message pair attached to an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationMessages {
    pub success: Option<&'static str>,
    pub failure: Option<&'static str>,
}

impl NotificationMessages {
    pub const fn failure(message: &'static str) -> Self {
        Self {
            success: None,
            failure: Some(message),
        }
    }
}

/// Runs `operation` and publishes the configured message for its outcome.
///
/// The result is returned unchanged; failures still propagate to the caller.
/// `skip_error_handling` suppresses the failure message only.
pub async fn with_global_notification<T, F>(
    notifier: &dyn Notifier,
    messages: NotificationMessages,
    skip_error_handling: bool,
    operation: F,
) -> ClientResult<T>
where
    F: Future<Output = ClientResult<T>>,
{
    let result = operation.await;
    match &result {
        Ok(_) => {
            if let Some(message) = messages.success {
                notifier.notify(Notification::success(message));
            }
        }
        Err(err) => {
            log::debug!("[Notifications] Operation failed: {}", err);
            if !skip_error_handling && let Some(message) = messages.failure {
                notifier.notify(Notification::error(message));
            }
        }
    }
    result
}

/// Forwards notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => log::info!("{}", notification.message),
            NotificationLevel::Warning => log::warn!("{}", notification.message),
            NotificationLevel::Error => log::error!("{}", notification.message),
        }
    }
}

/// Collects notifications so a consumer can render and drain them.
#[derive(Debug, Default, Clone)]
pub struct NotificationCenter {
    pending: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every notification published so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.write())
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.pending.read().clone()
    }

    pub fn len(&self) -> usize {
        self.pending.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.read().is_empty()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        self.pending.write().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::error::ClientError;

    #[tokio::test]
    async fn failure_message_is_published_and_error_propagates() {
        let center = NotificationCenter::new();
        let result: ClientResult<()> = with_global_notification(
            &center,
            NotificationMessages::failure("Failed to save integration"),
            false,
            async { Err(ClientError::Unauthorized) },
        )
        .await;

        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert_eq!(
            center.drain(),
            vec![Notification::error("Failed to save integration")]
        );
    }

    #[tokio::test]
    async fn skip_error_handling_suppresses_failure_text() {
        let center = NotificationCenter::new();
        let result: ClientResult<()> = with_global_notification(
            &center,
            NotificationMessages::failure("nope"),
            true,
            async { Err(ClientError::Unauthorized) },
        )
        .await;

        assert!(result.is_err());
        assert!(center.is_empty());
    }

    #[tokio::test]
    async fn success_message_only_when_configured() {
        let center = NotificationCenter::new();
        let messages = NotificationMessages {
            success: Some("Integration has been saved"),
            failure: None,
        };
        let value = with_global_notification(&center, messages, false, async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(center.len(), 1);

        with_global_notification(&center, NotificationMessages::default(), false, async {
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(center.len(), 1);
    }
}
