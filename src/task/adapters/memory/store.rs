//! In-memory lifecycle store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::notification::adapters::memory::InMemoryNotificationRepository;
use crate::notification::ports::NotificationRepository;
use crate::scoring::adapters::memory::InMemoryPerformancePointRepository;
use crate::scoring::ports::PerformancePointRepository;
use crate::task::adapters::memory::InMemoryTransactionLog;
use crate::task::domain::{Task, TaskId};
use crate::task::ports::{
    LifecycleStore, LifecycleStoreError, LifecycleStoreResult, TransactionLog, TransitionCommit,
};

/// Thread-safe in-memory lifecycle store.
///
/// Composes the in-memory audit log, notification repository, and
/// performance point log so a transition commit lands in the same stores
/// the read paths observe. The version check and the task write happen
/// under one write lock; the appended rows cannot fail afterwards short of
/// lock poisoning, which keeps the commit all-or-nothing. A durable
/// implementation would wrap the same writes in a database transaction.
#[derive(Debug, Clone)]
pub struct InMemoryLifecycleStore {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    ledger: InMemoryTransactionLog,
    notifications: InMemoryNotificationRepository,
    points: InMemoryPerformancePointRepository,
}

impl InMemoryLifecycleStore {
    /// Creates a store over the given shared in-memory adapters.
    ///
    /// The adapters are cheap clones; hand the same instances to the ledger,
    /// fanout, and scoring services so reads observe committed writes.
    #[must_use]
    pub fn new(
        ledger: InMemoryTransactionLog,
        notifications: InMemoryNotificationRepository,
        points: InMemoryPerformancePointRepository,
    ) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            ledger,
            notifications,
            points,
        }
    }

    fn guarded_write(&self, commit: &TransitionCommit) -> LifecycleStoreResult<()> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|err| LifecycleStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let task_id = commit.task.id();
        let stored = tasks
            .get(&task_id)
            .ok_or(LifecycleStoreError::NotFound(task_id))?;
        if stored.version() != commit.expected_version {
            return Err(LifecycleStoreError::Conflict(task_id));
        }
        tasks.insert(task_id, commit.task.clone());
        Ok(())
    }
}

#[async_trait]
impl LifecycleStore for InMemoryLifecycleStore {
    async fn insert(&self, task: &Task) -> LifecycleStoreResult<()> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|err| LifecycleStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if tasks.contains_key(&task.id()) {
            return Err(LifecycleStoreError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn load(&self, id: TaskId) -> LifecycleStoreResult<Option<Task>> {
        let tasks = self
            .tasks
            .read()
            .map_err(|err| LifecycleStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(tasks.get(&id).cloned())
    }

    async fn commit(&self, commit: TransitionCommit) -> LifecycleStoreResult<()> {
        // Of two racing commits, exactly one passes the version guard.
        self.guarded_write(&commit)?;

        if let Some(transaction) = &commit.transaction {
            self.ledger
                .append(transaction)
                .await
                .map_err(LifecycleStoreError::persistence)?;
        }
        if !commit.notifications.is_empty() {
            self.notifications
                .insert_batch(&commit.notifications)
                .await
                .map_err(LifecycleStoreError::persistence)?;
        }
        if let Some(point) = &commit.performance_point {
            self.points
                .append(point)
                .await
                .map_err(LifecycleStoreError::persistence)?;
        }
        Ok(())
    }
}
