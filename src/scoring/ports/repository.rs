//! Performance point persistence contract.

use crate::scoring::domain::PerformancePoint;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for performance point repository operations.
pub type PerformancePointRepositoryResult<T> = Result<T, PerformancePointRepositoryError>;

/// Append-only storage contract for performance points.
///
/// Completion awards append through the lifecycle store's transition
/// commit; the direct `append` exists for store implementations.
#[async_trait]
pub trait PerformancePointRepository: Send + Sync {
    /// Appends one award record.
    async fn append(&self, point: &PerformancePoint) -> PerformancePointRepositoryResult<()>;

    /// Returns every award record in append order.
    async fn list_all(&self) -> PerformancePointRepositoryResult<Vec<PerformancePoint>>;

    /// Returns the award records referencing one task.
    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> PerformancePointRepositoryResult<Vec<PerformancePoint>>;
}

/// Errors returned by performance point repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PerformancePointRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PerformancePointRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
