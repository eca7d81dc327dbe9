//! Audit ledger: validated construction and retrieval of audit records.

use crate::task::domain::{TaskId, TaskTransaction, UserId};
use crate::task::ports::{TransactionLog, TransactionLogError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by the audit ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The transition description is blank.
    #[error("audit comment must not be empty")]
    EmptyComment,

    /// A required identifier is the nil UUID.
    #[error("audit record requires non-nil task and user identifiers")]
    MissingIdentifier,

    /// The underlying log failed.
    #[error(transparent)]
    Log(#[from] TransactionLogError),
}

/// Append-only writer over the audit trail.
///
/// [`AuditLedger::record`] validates and constructs the record; persistence
/// rides the enclosing transition commit so an unaudited state change can
/// never be observed. [`AuditLedger::history`] reads the trail back.
pub struct AuditLedger<L, C>
where
    L: TransactionLog,
    C: Clock + Send + Sync,
{
    log: Arc<L>,
    clock: Arc<C>,
}

// Hand-written so cloning only requires the `Arc` fields to clone, not `L`/`C`
// themselves (a `#[derive(Clone)]` would wrongly demand `L: Clone, C: Clone`).
impl<L, C> Clone for AuditLedger<L, C>
where
    L: TransactionLog,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<L, C> AuditLedger<L, C>
where
    L: TransactionLog,
    C: Clock + Send + Sync,
{
    /// Creates a new audit ledger.
    #[must_use]
    pub const fn new(log: Arc<L>, clock: Arc<C>) -> Self {
        Self { log, clock }
    }

    /// Validates and constructs one audit record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyComment`] when the description is blank,
    /// or [`LedgerError::MissingIdentifier`] when any identifier is nil.
    pub fn record(
        &self,
        task_id: TaskId,
        from_user: UserId,
        to_user: UserId,
        comment: &str,
    ) -> Result<TaskTransaction, LedgerError> {
        if comment.trim().is_empty() {
            return Err(LedgerError::EmptyComment);
        }
        if task_id.as_ref().is_nil() || from_user.is_nil() || to_user.is_nil() {
            return Err(LedgerError::MissingIdentifier);
        }
        Ok(TaskTransaction::new(
            task_id,
            from_user,
            to_user,
            comment,
            self.clock.utc(),
        ))
    }

    /// Returns a task's audit trail in append order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Log`] when the underlying log fails.
    pub async fn history(&self, task_id: TaskId) -> Result<Vec<TaskTransaction>, LedgerError> {
        Ok(self.log.list_for_task(task_id).await?)
    }
}
