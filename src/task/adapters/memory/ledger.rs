//! In-memory transaction log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::domain::{TaskId, TaskTransaction};
use crate::task::ports::{TransactionLog, TransactionLogError, TransactionLogResult};

/// Thread-safe in-memory audit log in append order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionLog {
    state: Arc<RwLock<Vec<TaskTransaction>>>,
}

impl InMemoryTransactionLog {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLog for InMemoryTransactionLog {
    async fn append(&self, transaction: &TaskTransaction) -> TransactionLogResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TransactionLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.push(transaction.clone());
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> TransactionLogResult<Vec<TaskTransaction>> {
        let state = self.state.read().map_err(|err| {
            TransactionLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .iter()
            .filter(|transaction| transaction.task_id() == task_id)
            .cloned()
            .collect())
    }
}
