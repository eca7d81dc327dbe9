//! Task aggregate root and its guarded lifecycle transitions.

use super::{
    Difficulty, TaskComment, TaskDomainError, TaskId, TaskOperation, TaskStatus, TransitionError,
    UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskParams {
    creator: UserId,
    title: String,
    description: String,
    difficulty: Difficulty,
    deadline: DateTime<Utc>,
    parent: Option<TaskId>,
}

impl NewTaskParams {
    /// Creates parameters with required task fields.
    #[must_use]
    pub fn new(
        creator: UserId,
        title: impl Into<String>,
        difficulty: Difficulty,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            creator,
            title: title.into(),
            description: String::new(),
            difficulty,
            deadline,
            parent: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the parent task reference.
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted difficulty grade.
    pub difficulty: Difficulty,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creator identity.
    pub created_by: UserId,
    /// Persisted assignee identity, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted parent task reference, if any.
    pub parent: Option<TaskId>,
    /// Persisted comment thread.
    pub comments: Vec<TaskComment>,
    /// Persisted optimistic concurrency version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate root.
///
/// All lifecycle mutation goes through the guarded transition methods; each
/// applied transition refreshes `updated_at` and bumps `version`, which the
/// store uses for optimistic concurrency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    difficulty: Difficulty,
    deadline: DateTime<Utc>,
    status: TaskStatus,
    created_by: UserId,
    assigned_to: Option<UserId>,
    parent: Option<TaskId>,
    comments: Vec<TaskComment>,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank after
    /// trimming.
    pub fn new(params: NewTaskParams, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if params.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: params.title,
            description: params.description,
            difficulty: params.difficulty,
            deadline: params.deadline,
            status: TaskStatus::Pending,
            created_by: params.creator,
            assigned_to: None,
            parent: params.parent,
            comments: Vec::new(),
            version: 0,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            difficulty: data.difficulty,
            deadline: data.deadline,
            status: data.status,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
            parent: data.parent,
            comments: data.comments,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the difficulty grade.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creator identity.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the parent task reference, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<TaskId> {
        self.parent
    }

    /// Returns the comment thread in submission order.
    #[must_use]
    pub fn comments(&self) -> &[TaskComment] {
        &self.comments
    }

    /// Returns the optimistic concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Hands the task to an assignee and moves it to `Assigned`.
    ///
    /// Legal from any status; re-assignment of a completed task reopens it.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotCreator`] when the actor did not create
    /// the task, or [`TransitionError::SelfAssignment`] when the creator
    /// names themselves as assignee.
    pub fn assign(
        &mut self,
        actor: UserId,
        assignee: UserId,
        clock: &impl Clock,
    ) -> Result<(), TransitionError> {
        self.ensure_creator(actor, TaskOperation::Assign)?;
        if actor == assignee {
            return Err(TransitionError::SelfAssignment {
                task_id: self.id,
                actor,
            });
        }
        self.status = TaskStatus::Assigned;
        self.assigned_to = Some(assignee);
        self.touch(clock);
        Ok(())
    }

    /// Clears the current assignee without changing status.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotCreator`] when the actor did not create
    /// the task, or [`TransitionError::MissingAssignee`] when no assignee is
    /// set.
    pub fn unassign(&mut self, actor: UserId, clock: &impl Clock) -> Result<UserId, TransitionError> {
        self.ensure_creator(actor, TaskOperation::Unassign)?;
        let previous = self
            .assigned_to
            .take()
            .ok_or(TransitionError::MissingAssignee {
                task_id: self.id,
                operation: TaskOperation::Unassign,
            })?;
        self.touch(clock);
        Ok(previous)
    }

    /// Assignee accepts the assignment, moving the task to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::WrongStatus`] unless the task is
    /// `Assigned`, or [`TransitionError::NotAssignee`] when the actor is not
    /// the current assignee.
    pub fn accept(&mut self, actor: UserId, clock: &impl Clock) -> Result<(), TransitionError> {
        self.ensure_status(TaskStatus::Assigned, TaskOperation::Accept)?;
        self.ensure_assignee(actor, TaskOperation::Accept)?;
        self.status = TaskStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Assignee declines the assignment; the task stays `Assigned` with the
    /// assignee cleared, ready for re-assignment.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::WrongStatus`] unless the task is
    /// `Assigned`, or [`TransitionError::NotAssignee`] when the actor is not
    /// the current assignee.
    pub fn reject(&mut self, actor: UserId, clock: &impl Clock) -> Result<(), TransitionError> {
        self.ensure_status(TaskStatus::Assigned, TaskOperation::Reject)?;
        self.ensure_assignee(actor, TaskOperation::Reject)?;
        self.assigned_to = None;
        self.touch(clock);
        Ok(())
    }

    /// Assignee submits the work for review, moving the task to
    /// `UnderReview`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::WrongStatus`] unless the task is
    /// `InProgress`, or [`TransitionError::NotAssignee`] when the actor is
    /// not the current assignee.
    pub fn finish(&mut self, actor: UserId, clock: &impl Clock) -> Result<(), TransitionError> {
        self.ensure_status(TaskStatus::InProgress, TaskOperation::Finish)?;
        self.ensure_assignee(actor, TaskOperation::Finish)?;
        self.status = TaskStatus::UnderReview;
        self.touch(clock);
        Ok(())
    }

    /// Creator sends the work back, moving the task to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::WrongStatus`] unless the task is
    /// `UnderReview`, or [`TransitionError::NotCreator`] when the actor did
    /// not create the task.
    pub fn return_for_revision(
        &mut self,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<(), TransitionError> {
        self.ensure_status(TaskStatus::UnderReview, TaskOperation::ReturnForRevision)?;
        self.ensure_creator(actor, TaskOperation::ReturnForRevision)?;
        self.status = TaskStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Creator accepts the reviewed work, moving the task to `Completed`.
    ///
    /// Returns the assignee the completion is credited to.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::WrongStatus`] unless the task is
    /// `UnderReview`, [`TransitionError::NotCreator`] when the actor did not
    /// create the task, or [`TransitionError::MissingAssignee`] when no
    /// assignee is set.
    pub fn complete(&mut self, actor: UserId, clock: &impl Clock) -> Result<UserId, TransitionError> {
        self.ensure_status(TaskStatus::UnderReview, TaskOperation::Complete)?;
        self.ensure_creator(actor, TaskOperation::Complete)?;
        let assignee = self
            .assigned_to
            .ok_or(TransitionError::MissingAssignee {
                task_id: self.id,
                operation: TaskOperation::Complete,
            })?;
        self.status = TaskStatus::Completed;
        self.touch(clock);
        Ok(assignee)
    }

    /// Deadline trigger expires the task.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::WrongStatus`] when the task is already in
    /// a terminal status.
    pub fn expire(&mut self, clock: &impl Clock) -> Result<(), TransitionError> {
        if self.status.is_terminal() {
            return Err(TransitionError::WrongStatus {
                task_id: self.id,
                operation: TaskOperation::Expire,
                status: self.status,
            });
        }
        self.status = TaskStatus::Expired;
        self.touch(clock);
        Ok(())
    }

    /// Appends a comment to the thread.
    pub fn add_comment(&mut self, comment: TaskComment, clock: &impl Clock) {
        self.comments.push(comment);
        self.touch(clock);
    }

    fn ensure_creator(&self, actor: UserId, operation: TaskOperation) -> Result<(), TransitionError> {
        if actor == self.created_by {
            return Ok(());
        }
        Err(TransitionError::NotCreator {
            task_id: self.id,
            actor,
            operation,
        })
    }

    fn ensure_assignee(&self, actor: UserId, operation: TaskOperation) -> Result<(), TransitionError> {
        if self.assigned_to == Some(actor) {
            return Ok(());
        }
        Err(TransitionError::NotAssignee {
            task_id: self.id,
            actor,
            operation,
        })
    }

    fn ensure_status(
        &self,
        expected: TaskStatus,
        operation: TaskOperation,
    ) -> Result<(), TransitionError> {
        if self.status == expected {
            return Ok(());
        }
        Err(TransitionError::WrongStatus {
            task_id: self.id,
            operation,
            status: self.status,
        })
    }

    /// Refreshes `updated_at` and bumps the concurrency version.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version += 1;
    }
}
