//! Application services for performance scoring.

mod engine;

pub use engine::{ScoringEngine, ScoringError, ScoringResult};
