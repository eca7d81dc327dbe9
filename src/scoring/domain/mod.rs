//! Domain types for performance scoring.

mod leaderboard;
mod performance;

pub use leaderboard::{LeaderboardEntry, LeaderboardTotal, totals};
pub use performance::{PerformancePoint, PerformancePointId, points_for};
