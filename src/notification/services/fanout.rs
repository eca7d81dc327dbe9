//! Notification fanout: persist first, push best-effort.

use crate::notification::domain::{Notification, NotificationId};
use crate::notification::ports::{
    NotificationRepository, NotificationRepositoryError, PushTransport,
};
use crate::task::domain::{TaskId, UserId};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Result type for fanout operations.
pub type FanoutResult<T> = Result<T, FanoutError>;

/// Errors returned by fanout operations.
///
/// Push failures never appear here: persistence is the contract, delivery
/// is best effort.
#[derive(Debug, Clone, Error)]
pub enum FanoutError {
    /// Notification persistence failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
}

/// Builds, persists, and pushes per-user notification records.
///
/// Every entry point persists rows before any push is attempted. A push
/// failure for one recipient is logged and does not affect persistence or
/// delivery to the others.
pub struct NotificationFanout<R, P, C>
where
    R: NotificationRepository,
    P: PushTransport,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    transport: Arc<P>,
    clock: Arc<C>,
}

// Hand-written so cloning only requires the `Arc` fields to clone, not `R`/`P`/`C`
// themselves (a `#[derive(Clone)]` would wrongly demand those bounds).
impl<R, P, C> Clone for NotificationFanout<R, P, C>
where
    R: NotificationRepository,
    P: PushTransport,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            transport: Arc::clone(&self.transport),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, P, C> NotificationFanout<R, P, C>
where
    R: NotificationRepository,
    P: PushTransport,
    C: Clock + Send + Sync,
{
    /// Creates a new fanout service.
    #[must_use]
    pub const fn new(repository: Arc<R>, transport: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            transport,
            clock,
        }
    }

    /// Notifies one user of a fresh assignment.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::Repository`] when persistence fails.
    pub async fn notify_assignment(
        &self,
        recipient: UserId,
        task_title: &str,
        task_id: TaskId,
    ) -> FanoutResult<Notification> {
        let notification =
            Notification::assignment(recipient, task_title, task_id, &*self.clock);
        self.repository
            .insert_batch(std::slice::from_ref(&notification))
            .await?;
        self.push_batch(std::slice::from_ref(&notification)).await;
        Ok(notification)
    }

    /// Notifies one user of a lifecycle event with a pre-built message.
    ///
    /// Used for events that carry no surrounding task transaction, such as
    /// membership changes raised by the embedding application.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::Repository`] when persistence fails.
    pub async fn notify_lifecycle_event(
        &self,
        recipient: UserId,
        message: impl Into<String> + Send,
        task_id: Option<TaskId>,
    ) -> FanoutResult<Notification> {
        let notification = Notification::new(recipient, message, task_id, &*self.clock);
        self.repository
            .insert_batch(std::slice::from_ref(&notification))
            .await?;
        self.push_batch(std::slice::from_ref(&notification)).await;
        Ok(notification)
    }

    /// Notifies many users, one message each, in a single batch write.
    ///
    /// Duplicate recipients keep their first entry only. All rows persist
    /// before the first push; each push then proceeds independently.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::Repository`] when the batch write fails; no
    /// push is attempted in that case.
    pub async fn notify_mentions(
        &self,
        task_id: TaskId,
        messages: Vec<(UserId, String)>,
    ) -> FanoutResult<Vec<Notification>> {
        let mut seen: HashSet<UserId> = HashSet::new();
        let notifications: Vec<Notification> = messages
            .into_iter()
            .filter(|(recipient, _)| seen.insert(*recipient))
            .map(|(recipient, message)| {
                Notification::new(recipient, message, Some(task_id), &*self.clock)
            })
            .collect();
        if notifications.is_empty() {
            return Ok(notifications);
        }
        self.repository.insert_batch(&notifications).await?;
        tracing::debug!(task_id = %task_id, count = notifications.len(), "mention fanout persisted");
        self.push_batch(&notifications).await;
        Ok(notifications)
    }

    /// Pushes already-persisted notifications to the transport.
    ///
    /// Lifecycle transitions persist their notification rows inside the
    /// transition commit and hand them here once the commit has returned.
    /// Failures are logged and suppressed; this core does not retry.
    pub async fn push_batch(&self, notifications: &[Notification]) {
        for notification in notifications {
            let payload = match serde_json::to_value(notification) {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::warn!(
                        notification = %notification.id(),
                        error = %err,
                        "notification payload serialisation failed"
                    );
                    continue;
                }
            };
            if let Err(err) = self.transport.push(notification.recipient(), &payload).await {
                tracing::warn!(
                    notification = %notification.id(),
                    recipient = %notification.recipient(),
                    error = %err,
                    "notification push failed"
                );
            }
        }
    }

    /// Returns a recipient's notifications in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::Repository`] when the listing fails.
    pub async fn notifications_for(&self, recipient: UserId) -> FanoutResult<Vec<Notification>> {
        Ok(self.repository.list_for_recipient(recipient).await?)
    }

    /// Marks one notification as read.
    ///
    /// # Errors
    ///
    /// Returns [`FanoutError::Repository`] when the notification does not
    /// exist or the write fails.
    pub async fn mark_read(&self, id: NotificationId) -> FanoutResult<Notification> {
        Ok(self.repository.mark_read(id).await?)
    }
}
