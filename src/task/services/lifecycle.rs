//! Task lifecycle orchestration: every guarded transition plus comments.

use crate::notification::domain::Notification;
use crate::notification::ports::{DirectoryError, NotificationRepository, PushTransport, UserDirectory};
use crate::notification::services::{FanoutError, MentionResolver, NotificationFanout};
use crate::task::domain::{
    Task, TaskComment, TaskDomainError, TaskId, TransitionError, UserId,
};
use crate::task::ports::{LifecycleStore, LifecycleStoreError, TransactionLog, TransitionCommit};
use crate::task::services::ledger::{AuditLedger, LedgerError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Service-level errors for lifecycle operations.
///
/// Variants map onto the caller-facing taxonomy through the category
/// predicates: [`LifecycleError::is_not_found`],
/// [`LifecycleError::is_forbidden`], [`LifecycleError::is_invalid_state`],
/// and [`LifecycleError::is_validation`]. Anything outside those categories
/// is an infrastructure failure.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The user does not exist in the directory.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// A transition guard rejected the operation.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// A required free-text input is blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending input.
        field: &'static str,
    },

    /// Domain construction validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Audit record validation or retrieval failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A concurrent transition won the race on this task.
    #[error("task {0} was modified concurrently")]
    Conflict(TaskId),

    /// The lifecycle store failed.
    #[error(transparent)]
    Store(LifecycleStoreError),

    /// Notification persistence failed.
    #[error(transparent)]
    Fanout(#[from] FanoutError),

    /// The user directory failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl LifecycleError {
    /// Returns `true` when a referenced task or user is absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_) | Self::UserNotFound(_))
    }

    /// Returns `true` when the actor lacked the required relationship to
    /// the task.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        match self {
            Self::Transition(err) => err.is_forbidden(),
            _ => false,
        }
    }

    /// Returns `true` when the operation was illegal from the task's
    /// current status, including losing a concurrency race.
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        match self {
            Self::Transition(err) => err.is_invalid_state(),
            Self::Conflict(_) => true,
            _ => false,
        }
    }

    /// Returns `true` when a required input was missing or empty.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyField { .. }
                | Self::Domain(_)
                | Self::Ledger(LedgerError::EmptyComment | LedgerError::MissingIdentifier)
        )
    }

    fn from_store(err: LifecycleStoreError) -> Self {
        match err {
            LifecycleStoreError::NotFound(task_id) => Self::TaskNotFound(task_id),
            LifecycleStoreError::Conflict(task_id) => Self::Conflict(task_id),
            other => Self::Store(other),
        }
    }
}

/// Task lifecycle orchestration service.
///
/// Each operation loads the task, applies the domain guard, and persists
/// the mutated task together with its audit record and notification rows in
/// one transition commit. Pushes go out only after the commit returns; a
/// failed push never unwinds committed state.
#[derive(Clone)]
pub struct TaskLifecycleService<S, L, R, P, D, C>
where
    S: LifecycleStore,
    L: TransactionLog,
    R: NotificationRepository,
    P: PushTransport,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    ledger: AuditLedger<L, C>,
    fanout: NotificationFanout<R, P, C>,
    resolver: MentionResolver<D>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<S, L, R, P, D, C> TaskLifecycleService<S, L, R, P, D, C>
where
    S: LifecycleStore,
    L: TransactionLog,
    R: NotificationRepository,
    P: PushTransport,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        ledger: AuditLedger<L, C>,
        fanout: NotificationFanout<R, P, C>,
        directory: Arc<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            ledger,
            fanout,
            resolver: MentionResolver::new(Arc::clone(&directory)),
            directory,
            clock,
        }
    }

    /// Loads a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the store fails.
    pub async fn find(&self, task_id: TaskId) -> LifecycleResult<Option<Task>> {
        self.store
            .load(task_id)
            .await
            .map_err(LifecycleError::from_store)
    }

    /// Hands the task to an assignee.
    ///
    /// Legal from any status; only the creator may assign, and never to
    /// themselves. The assignee is notified.
    ///
    /// # Errors
    ///
    /// Returns a not-found, guard, or persistence error as described on
    /// [`LifecycleError`].
    pub async fn assign(
        &self,
        task_id: TaskId,
        actor: UserId,
        assignee: UserId,
    ) -> LifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let expected = task.version();
        task.assign(actor, assignee, &*self.clock)?;
        let transaction = self.ledger.record(task_id, actor, assignee, "Task assigned")?;
        let notifications = vec![Notification::assignment(
            assignee,
            task.title(),
            task_id,
            &*self.clock,
        )];
        self.apply(
            TransitionCommit::new(task.clone(), expected)
                .with_transaction(transaction)
                .with_notifications(notifications.clone()),
        )
        .await?;
        self.fanout.push_batch(&notifications).await;
        Ok(task)
    }

    /// Clears the current assignee without changing status.
    ///
    /// # Errors
    ///
    /// Returns a not-found, guard, or persistence error as described on
    /// [`LifecycleError`].
    pub async fn unassign(&self, task_id: TaskId, actor: UserId) -> LifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let expected = task.version();
        let previous = task.unassign(actor, &*self.clock)?;
        let transaction = self.ledger.record(task_id, actor, previous, "Task unassigned")?;
        self.apply(
            TransitionCommit::new(task.clone(), expected).with_transaction(transaction),
        )
        .await?;
        Ok(task)
    }

    /// Assignee accepts the assignment. The creator is notified.
    ///
    /// # Errors
    ///
    /// Returns a not-found, guard, or persistence error as described on
    /// [`LifecycleError`].
    pub async fn accept(&self, task_id: TaskId, actor: UserId) -> LifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let expected = task.version();
        task.accept(actor, &*self.clock)?;
        let creator = task.created_by();
        let transaction = self.ledger.record(task_id, actor, creator, "Task accepted")?;
        let notifications =
            self.notify_unless_self(actor, creator, format!("Task accepted: {}", task.title()), task_id);
        self.apply(
            TransitionCommit::new(task.clone(), expected)
                .with_transaction(transaction)
                .with_notifications(notifications.clone()),
        )
        .await?;
        self.fanout.push_batch(&notifications).await;
        Ok(task)
    }

    /// Assignee declines the assignment with a reason; the task stays
    /// `Assigned` with the assignee cleared. The creator is notified.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::EmptyField`] when the reason is blank, or
    /// a not-found, guard, or persistence error as described on
    /// [`LifecycleError`].
    pub async fn reject(
        &self,
        task_id: TaskId,
        actor: UserId,
        reason: &str,
    ) -> LifecycleResult<Task> {
        if reason.trim().is_empty() {
            return Err(LifecycleError::EmptyField { field: "reason" });
        }
        let mut task = self.load(task_id).await?;
        let expected = task.version();
        task.reject(actor, &*self.clock)?;
        let creator = task.created_by();
        let message = format!("Task rejected: {reason}");
        let transaction = self.ledger.record(task_id, actor, creator, &message)?;
        let notifications = self.notify_unless_self(actor, creator, message, task_id);
        self.apply(
            TransitionCommit::new(task.clone(), expected)
                .with_transaction(transaction)
                .with_notifications(notifications.clone()),
        )
        .await?;
        self.fanout.push_batch(&notifications).await;
        Ok(task)
    }

    /// Assignee submits the work for review. The creator is notified.
    ///
    /// # Errors
    ///
    /// Returns a not-found, guard, or persistence error as described on
    /// [`LifecycleError`].
    pub async fn finish(&self, task_id: TaskId, actor: UserId) -> LifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let expected = task.version();
        task.finish(actor, &*self.clock)?;
        let creator = task.created_by();
        let transaction = self.ledger.record(task_id, actor, creator, "Task finished")?;
        let notifications = self.notify_unless_self(
            actor,
            creator,
            format!("Task ready for review: {}", task.title()),
            task_id,
        );
        self.apply(
            TransitionCommit::new(task.clone(), expected)
                .with_transaction(transaction)
                .with_notifications(notifications.clone()),
        )
        .await?;
        self.fanout.push_batch(&notifications).await;
        Ok(task)
    }

    /// Creator sends reviewed work back with a reason. The assignee is
    /// notified.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::EmptyField`] when the reason is blank, or
    /// a not-found, guard, or persistence error as described on
    /// [`LifecycleError`].
    pub async fn return_for_revision(
        &self,
        task_id: TaskId,
        actor: UserId,
        reason: &str,
    ) -> LifecycleResult<Task> {
        if reason.trim().is_empty() {
            return Err(LifecycleError::EmptyField { field: "reason" });
        }
        let mut task = self.load(task_id).await?;
        let expected = task.version();
        task.return_for_revision(actor, &*self.clock)?;
        let recipient = task.assigned_to();
        let message = format!("Task returned for revision: {reason}");
        let transaction =
            self.ledger
                .record(task_id, actor, recipient.unwrap_or(actor), &message)?;
        let notifications = recipient.map_or_else(Vec::new, |assignee| {
            self.notify_unless_self(actor, assignee, message.clone(), task_id)
        });
        self.apply(
            TransitionCommit::new(task.clone(), expected)
                .with_transaction(transaction)
                .with_notifications(notifications.clone()),
        )
        .await?;
        self.fanout.push_batch(&notifications).await;
        Ok(task)
    }

    /// Deadline trigger expires the task. The assignee, when set, is
    /// notified.
    ///
    /// # Errors
    ///
    /// Returns a not-found, guard, or persistence error as described on
    /// [`LifecycleError`].
    pub async fn expire(&self, task_id: TaskId) -> LifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        let expected = task.version();
        task.expire(&*self.clock)?;
        let creator = task.created_by();
        let recipient = task.assigned_to();
        let transaction =
            self.ledger
                .record(task_id, creator, recipient.unwrap_or(creator), "Task expired")?;
        let notifications = recipient.map_or_else(Vec::new, |assignee| {
            vec![Notification::new(
                assignee,
                format!("Task expired: {}", task.title()),
                Some(task_id),
                &*self.clock,
            )]
        });
        self.apply(
            TransitionCommit::new(task.clone(), expected)
                .with_transaction(transaction)
                .with_notifications(notifications.clone()),
        )
        .await?;
        self.fanout.push_batch(&notifications).await;
        Ok(task)
    }

    /// Appends a comment and fans out mention notifications.
    ///
    /// The comment lands on the task through a version-checked commit (no
    /// status change, no audit row); mention rows then persist as one batch
    /// before any push is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UserNotFound`] when the author is unknown,
    /// [`LifecycleError::Domain`] when the content is blank, or a
    /// not-found or persistence error as described on [`LifecycleError`].
    pub async fn add_comment(
        &self,
        task_id: TaskId,
        author: UserId,
        text: &str,
    ) -> LifecycleResult<TaskComment> {
        let mut task = self.load(task_id).await?;
        let author_ref = self
            .directory
            .find_by_id(author)
            .await?
            .ok_or(LifecycleError::UserNotFound(author))?;
        let mentioned = self.resolver.resolve(author, text).await?;
        let mention_ids: Vec<UserId> = mentioned.iter().map(|user| user.id()).collect();
        let comment = TaskComment::new(task_id, author, text, mention_ids, &*self.clock)?;

        let expected = task.version();
        let title = task.title().to_owned();
        task.add_comment(comment.clone(), &*self.clock);
        self.apply(TransitionCommit::new(task, expected)).await?;

        let messages: Vec<(UserId, String)> = mentioned
            .iter()
            .map(|user| {
                (
                    user.id(),
                    format!(
                        "{} mentioned you in task: {title}",
                        author_ref.username()
                    ),
                )
            })
            .collect();
        if !messages.is_empty() {
            self.fanout.notify_mentions(task_id, messages).await?;
        }
        Ok(comment)
    }

    async fn load(&self, task_id: TaskId) -> LifecycleResult<Task> {
        self.store
            .load(task_id)
            .await
            .map_err(LifecycleError::from_store)?
            .ok_or(LifecycleError::TaskNotFound(task_id))
    }

    async fn apply(&self, commit: TransitionCommit) -> LifecycleResult<()> {
        self.store
            .commit(commit)
            .await
            .map_err(LifecycleError::from_store)
    }

    /// Builds the counterparty notification, dropping self-notification.
    fn notify_unless_self(
        &self,
        actor: UserId,
        recipient: UserId,
        message: String,
        task_id: TaskId,
    ) -> Vec<Notification> {
        if recipient == actor {
            return Vec::new();
        }
        vec![Notification::new(
            recipient,
            message,
            Some(task_id),
            &*self.clock,
        )]
    }
}
