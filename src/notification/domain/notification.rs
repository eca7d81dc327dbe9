//! Notification record and its message templates.

use super::NotificationId;
use crate::task::domain::{TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A per-user notification row.
///
/// Created unread by the fanout; the only permitted mutation afterwards is
/// flipping the read flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    message: String,
    task_id: Option<TaskId>,
    read: bool,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification.
    #[must_use]
    pub fn new(
        recipient: UserId,
        message: impl Into<String>,
        task_id: Option<TaskId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            message: message.into(),
            task_id,
            read: false,
            created_at: clock.utc(),
        }
    }

    /// Creates the assignment notification for a newly assigned task.
    #[must_use]
    pub fn assignment(
        recipient: UserId,
        task_title: &str,
        task_id: TaskId,
        clock: &impl Clock,
    ) -> Self {
        Self::new(
            recipient,
            format!("New task: {task_title} assigned"),
            Some(task_id),
            clock,
        )
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient identity.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the related task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns `true` once the recipient has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the notification as read.
    pub const fn mark_read(&mut self) {
        self.read = true;
    }
}
