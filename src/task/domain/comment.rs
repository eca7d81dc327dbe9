//! Immutable task comment record.

use super::{CommentId, TaskDomainError, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A comment submitted on a task.
///
/// Created once on submission and immutable thereafter. The mentioned-user
/// set is resolved at submission time and frozen with the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    id: CommentId,
    task_id: TaskId,
    author: UserId,
    content: String,
    mentions: Vec<UserId>,
    created_at: DateTime<Utc>,
}

impl TaskComment {
    /// Creates a new comment record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyComment`] when the content is blank
    /// after trimming.
    pub fn new(
        task_id: TaskId,
        author: UserId,
        content: impl Into<String>,
        mentions: Vec<UserId>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let text = content.into();
        if text.trim().is_empty() {
            return Err(TaskDomainError::EmptyComment);
        }
        Ok(Self {
            id: CommentId::new(),
            task_id,
            author,
            content: text,
            mentions,
            created_at: clock.utc(),
        })
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the task the comment belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author identity.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the comment content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the resolved mentioned users in first-appearance order.
    #[must_use]
    pub fn mentions(&self) -> &[UserId] {
        &self.mentions
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
