//! In-memory adapters backing tests and embedded use.

mod performance;

pub use performance::InMemoryPerformancePointRepository;
