//! Lifecycle store port: the transaction boundary for task transitions.

use crate::notification::domain::Notification;
use crate::scoring::domain::PerformancePoint;
use crate::task::domain::{Task, TaskId, TaskTransaction};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for lifecycle store operations.
pub type LifecycleStoreResult<T> = Result<T, LifecycleStoreError>;

/// Everything one lifecycle transition persists.
///
/// The store applies a commit all-or-nothing: the task write is guarded by
/// `expected_version`, and the audit row, notification rows, and performance
/// point land only when that guard passes. A crash between the guard and the
/// appended rows must not be observable.
#[derive(Debug, Clone)]
pub struct TransitionCommit {
    /// The mutated task aggregate (version already bumped).
    pub task: Task,
    /// The version the stored task must still have for the commit to apply.
    pub expected_version: u64,
    /// Audit record for the transition, when the operation writes one.
    pub transaction: Option<TaskTransaction>,
    /// Notification rows persisted with the transition.
    pub notifications: Vec<Notification>,
    /// Performance point awarded by a completion, when the operation awards
    /// one.
    pub performance_point: Option<PerformancePoint>,
}

impl TransitionCommit {
    /// Creates a commit carrying only the task write.
    #[must_use]
    pub const fn new(task: Task, expected_version: u64) -> Self {
        Self {
            task,
            expected_version,
            transaction: None,
            notifications: Vec::new(),
            performance_point: None,
        }
    }

    /// Attaches the audit record.
    #[must_use]
    pub fn with_transaction(mut self, transaction: TaskTransaction) -> Self {
        self.transaction = Some(transaction);
        self
    }

    /// Attaches notification rows.
    #[must_use]
    pub fn with_notifications(mut self, notifications: Vec<Notification>) -> Self {
        self.notifications = notifications;
        self
    }

    /// Attaches the awarded performance point.
    #[must_use]
    pub fn with_performance_point(mut self, point: PerformancePoint) -> Self {
        self.performance_point = Some(point);
        self
    }
}

/// Task persistence contract for lifecycle operations.
///
/// Task creation and deletion belong to the embedding application's CRUD
/// layer; this port only seeds (`insert`), loads, and commits transitions.
#[async_trait]
pub trait LifecycleStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleStoreError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> LifecycleStoreResult<()>;

    /// Loads a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn load(&self, id: TaskId) -> LifecycleStoreResult<Option<Task>>;

    /// Applies a transition commit atomically.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleStoreError::NotFound`] when the task does not
    /// exist, or [`LifecycleStoreError::Conflict`] when the stored version
    /// no longer matches `expected_version` (a concurrent transition won the
    /// race).
    async fn commit(&self, commit: TransitionCommit) -> LifecycleStoreResult<()>;
}

/// Errors returned by lifecycle store implementations.
#[derive(Debug, Clone, Error)]
pub enum LifecycleStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored task version no longer matches the expected version.
    #[error("task {0} was modified concurrently")]
    Conflict(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LifecycleStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
