//! Scoring engine: completion with scoring and leaderboard reads.

use crate::notification::domain::Notification;
use crate::notification::ports::{DirectoryError, NotificationRepository, PushTransport, UserDirectory};
use crate::notification::services::NotificationFanout;
use crate::scoring::domain::{LeaderboardEntry, PerformancePoint, points_for, totals};
use crate::scoring::ports::{PerformancePointRepository, PerformancePointRepositoryError};
use crate::task::domain::{Task, TaskId, TransitionError, UserId};
use crate::task::ports::{LifecycleStore, LifecycleStoreError, TransactionLog, TransitionCommit};
use crate::task::services::{AuditLedger, LedgerError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Result type for scoring operations.
pub type ScoringResult<T> = Result<T, ScoringError>;

/// Service-level errors for scoring operations.
///
/// As with the lifecycle service, the category predicates map variants onto
/// the caller-facing taxonomy.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A transition guard rejected the completion.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// A required free-text input is blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending input.
        field: &'static str,
    },

    /// Audit record validation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A concurrent transition won the race on this task.
    #[error("task {0} was modified concurrently")]
    Conflict(TaskId),

    /// The lifecycle store failed.
    #[error(transparent)]
    Store(LifecycleStoreError),

    /// The performance point log failed.
    #[error(transparent)]
    Points(#[from] PerformancePointRepositoryError),

    /// The user directory failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl ScoringError {
    /// Returns `true` when the referenced task is absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_))
    }

    /// Returns `true` when the reviewer lacked the required relationship to
    /// the task.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        match self {
            Self::Transition(err) => err.is_forbidden(),
            _ => false,
        }
    }

    /// Returns `true` when the completion was illegal from the task's
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

/// Performance scoring engine.
///
/// Completion is itself a lifecycle transition: the engine runs the same
/// domain guards as every other operation and persists the status change,
/// the point award, the audit record, and the assignee notification in one
/// transition commit. The leaderboard is recomputed on demand from the
/// append-only point log.
#[derive(Clone)]
pub struct ScoringEngine<S, L, Q, R, P, D, C>
where
    S: LifecycleStore,
    L: TransactionLog,
    Q: PerformancePointRepository,
    R: NotificationRepository,
    P: PushTransport,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    ledger: AuditLedger<L, C>,
    points: Arc<Q>,
    fanout: NotificationFanout<R, P, C>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<S, L, Q, R, P, D, C> ScoringEngine<S, L, Q, R, P, D, C>
where
    S: LifecycleStore,
    L: TransactionLog,
    Q: PerformancePointRepository,
    R: NotificationRepository,
    P: PushTransport,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new scoring engine.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        ledger: AuditLedger<L, C>,
        points: Arc<Q>,
        fanout: NotificationFanout<R, P, C>,
        directory: Arc<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            ledger,
            points,
            fanout,
            directory,
            clock,
        }
    }

    /// Completes a reviewed task and awards difficulty-based points to its
    /// assignee.
    ///
    /// Exactly one point record can ever exist per task: the status guard
    /// admits only `UnderReview` tasks and the commit's version check makes
    /// a racing second completion lose with [`ScoringError::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::EmptyField`] when the reason is blank, a
    /// guard error when the task is not under review, the reviewer is not
    /// the creator, or no assignee is set, or a not-found or persistence
    /// error as described on [`ScoringError`].
    pub async fn complete_with_score(
        &self,
        task_id: TaskId,
        reviewer: UserId,
        reason: &str,
    ) -> ScoringResult<Task> {
        if reason.trim().is_empty() {
            return Err(ScoringError::EmptyField { field: "reason" });
        }
        let mut task = self
            .store
            .load(task_id)
            .await
            .map_err(ScoringError::from_store)?
            .ok_or(ScoringError::TaskNotFound(task_id))?;
        let expected = task.version();
        let assignee = task.complete(reviewer, &*self.clock)?;

        let awarded = points_for(task.difficulty());
        let point = PerformancePoint::new(assignee, task_id, awarded, reason, self.clock.utc());
        let transaction =
            self.ledger
                .record(task_id, reviewer, assignee, "Performance Point Added")?;
        let notifications = if assignee == reviewer {
            Vec::new()
        } else {
            vec![Notification::new(
                assignee,
                format!("Task completed: {awarded} points awarded"),
                Some(task_id),
                &*self.clock,
            )]
        };

        self.store
            .commit(
                TransitionCommit::new(task.clone(), expected)
                    .with_transaction(transaction)
                    .with_notifications(notifications.clone())
                    .with_performance_point(point),
            )
            .await
            .map_err(ScoringError::from_store)?;
        tracing::info!(
            task = %task_id,
            recipient = %assignee,
            points = awarded,
            "performance point awarded"
        );
        self.fanout.push_batch(&notifications).await;
        Ok(task)
    }

    /// Returns the leaderboard: summed points per recipient, sorted by
    /// total descending with ties in first-award order.
    ///
    /// An empty point log yields an empty leaderboard. A recipient missing
    /// from the directory keeps their row under their identity string.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Points`] or [`ScoringError::Directory`] when
    /// a read fails.
    pub async fn leaderboard(&self) -> ScoringResult<Vec<LeaderboardEntry>> {
        let rows = self.points.list_all().await?;
        let ranked = totals(&rows);
        let mut entries = Vec::with_capacity(ranked.len());
        for row in ranked {
            let display_name = self
                .directory
                .find_by_id(row.user)
                .await?
                .map_or_else(|| row.user.to_string(), |user| user.display_name().to_owned());
            entries.push(LeaderboardEntry::new(row.user, display_name, row.total));
        }
        Ok(entries)
    }
}
