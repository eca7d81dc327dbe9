//! Port contracts for performance point persistence.

mod repository;

pub use repository::{
    PerformancePointRepository, PerformancePointRepositoryError, PerformancePointRepositoryResult,
};
