//! Notification persistence contract.

use crate::notification::domain::{Notification, NotificationId};
use crate::task::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Notification persistence contract.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persists a batch of notification rows.
    ///
    /// The batch lands as a unit: either every row persists or none do.
    async fn insert_batch(
        &self,
        notifications: &[Notification],
    ) -> NotificationRepositoryResult<()>;

    /// Returns a recipient's notifications in insertion order.
    async fn list_for_recipient(
        &self,
        recipient: UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Flips the read flag on a notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] when the
    /// notification does not exist.
    async fn mark_read(&self, id: NotificationId) -> NotificationRepositoryResult<Notification>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// The notification was not found.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
