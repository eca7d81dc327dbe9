//! In-memory performance point log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::scoring::domain::PerformancePoint;
use crate::scoring::ports::{
    PerformancePointRepository, PerformancePointRepositoryError,
    PerformancePointRepositoryResult,
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory performance point log in append order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPerformancePointRepository {
    state: Arc<RwLock<Vec<PerformancePoint>>>,
}

impl InMemoryPerformancePointRepository {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PerformancePointRepository for InMemoryPerformancePointRepository {
    async fn append(&self, point: &PerformancePoint) -> PerformancePointRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PerformancePointRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.push(point.clone());
        Ok(())
    }

    async fn list_all(&self) -> PerformancePointRepositoryResult<Vec<PerformancePoint>> {
        let state = self.state.read().map_err(|err| {
            PerformancePointRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.clone())
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> PerformancePointRepositoryResult<Vec<PerformancePoint>> {
        let state = self.state.read().map_err(|err| {
            PerformancePointRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .iter()
            .filter(|point| point.task_id() == task_id)
            .cloned()
            .collect())
    }
}
