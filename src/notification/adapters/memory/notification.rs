//! In-memory notification repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notification::domain::{Notification, NotificationId};
use crate::notification::ports::{
    NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult,
};
use crate::task::domain::UserId;

/// Thread-safe in-memory notification repository.
///
/// Rows are held in insertion order; clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored row in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn all(&self) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.clone())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert_batch(
        &self,
        notifications: &[Notification],
    ) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.extend_from_slice(notifications);
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient: UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .iter()
            .filter(|notification| notification.recipient() == recipient)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: NotificationId) -> NotificationRepositoryResult<Notification> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let notification = state
            .iter_mut()
            .find(|notification| notification.id() == id)
            .ok_or(NotificationRepositoryError::NotFound(id))?;
        notification.mark_read();
        Ok(notification.clone())
    }
}
