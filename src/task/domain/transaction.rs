//! Append-only audit transaction record.

use super::{TaskId, TransactionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One audit record describing a lifecycle transition.
///
/// Created once per transition and never mutated or deleted. The record is
/// independent of current task state: the trail survives any later
/// transitions of the task it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTransaction {
    id: TransactionId,
    task_id: TaskId,
    from_user: UserId,
    to_user: UserId,
    comment: String,
    created_at: DateTime<Utc>,
}

impl TaskTransaction {
    /// Creates a new audit record.
    ///
    /// Field validation lives in the audit ledger; this constructor is the
    /// raw record shape.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        from_user: UserId,
        to_user: UserId,
        comment: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            task_id,
            from_user,
            to_user,
            comment: comment.into(),
            created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> TransactionId {
        self.id
    }

    /// Returns the task the record describes.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the identity the transition originated from.
    #[must_use]
    pub const fn from_user(&self) -> UserId {
        self.from_user
    }

    /// Returns the identity the transition was directed at.
    #[must_use]
    pub const fn to_user(&self) -> UserId {
        self.to_user
    }

    /// Returns the free-text transition description.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the record timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
