//! Error types for task domain validation, guards, and parsing.

use super::{TaskId, TaskOperation, TaskStatus, UserId};
use thiserror::Error;

/// Guard violations raised by task lifecycle transitions.
///
/// The first three variants are authorisation failures (the actor lacks the
/// required relationship to the task); the remaining two are state failures
/// (the operation is illegal from the task's current status).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The actor is not the task's creator.
    #[error("{operation} on task {task_id} requires the creator, user {actor} is not")]
    NotCreator {
        /// Task the operation targeted.
        task_id: TaskId,
        /// Actor that attempted the operation.
        actor: UserId,
        /// Operation that was attempted.
        operation: TaskOperation,
    },

    /// The actor is not the task's current assignee.
    #[error("{operation} on task {task_id} requires the assignee, user {actor} is not")]
    NotAssignee {
        /// Task the operation targeted.
        task_id: TaskId,
        /// Actor that attempted the operation.
        actor: UserId,
        /// Operation that was attempted.
        operation: TaskOperation,
    },

    /// The creator attempted to assign the task to themselves.
    #[error("task {task_id} cannot be assigned to its own creator {actor}")]
    SelfAssignment {
        /// Task the operation targeted.
        task_id: TaskId,
        /// Creator that attempted the self-assignment.
        actor: UserId,
    },

    /// The operation is not legal from the task's current status.
    #[error("{operation} is not legal for task {task_id} in status {status}")]
    WrongStatus {
        /// Task the operation targeted.
        task_id: TaskId,
        /// Operation that was attempted.
        operation: TaskOperation,
        /// Status the task was in.
        status: TaskStatus,
    },

    /// The operation requires an assignee and the task has none.
    #[error("{operation} requires task {task_id} to have an assignee")]
    MissingAssignee {
        /// Task the operation targeted.
        task_id: TaskId,
        /// Operation that was attempted.
        operation: TaskOperation,
    },
}

impl TransitionError {
    /// Returns `true` for authorisation failures (`Forbidden` category).
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Self::NotCreator { .. } | Self::NotAssignee { .. } | Self::SelfAssignment { .. }
        )
    }

    /// Returns `true` for state failures (`InvalidState` category).
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::WrongStatus { .. } | Self::MissingAssignee { .. })
    }
}

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The comment content is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyComment,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing difficulty grades from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown difficulty: {0}")]
pub struct ParseDifficultyError(pub String);
