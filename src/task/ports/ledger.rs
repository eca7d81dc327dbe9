//! Transaction log port for the append-only audit trail.

use crate::task::domain::{TaskId, TaskTransaction};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for transaction log operations.
pub type TransactionLogResult<T> = Result<T, TransactionLogError>;

/// Append-only storage contract for audit records.
///
/// Records are never mutated or deleted. Lifecycle transitions append
/// through the store's transition commit; the direct `append` exists for
/// store implementations and for events recorded outside a task transaction.
#[async_trait]
pub trait TransactionLog: Send + Sync {
    /// Appends one audit record.
    async fn append(&self, transaction: &TaskTransaction) -> TransactionLogResult<()>;

    /// Returns all audit records for a task in append order.
    async fn list_for_task(&self, task_id: TaskId) -> TransactionLogResult<Vec<TaskTransaction>>;
}

/// Errors returned by transaction log implementations.
#[derive(Debug, Clone, Error)]
pub enum TransactionLogError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransactionLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
