//! Leaderboard aggregation over the performance point log.

use super::PerformancePoint;
use crate::task::domain::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summed points for one recipient, before the display-name join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardTotal {
    /// Recipient identity.
    pub user: UserId,
    /// Sum of the recipient's awarded points.
    pub total: i64,
}

/// One leaderboard row as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    user: UserId,
    display_name: String,
    total: i64,
}

impl LeaderboardEntry {
    /// Creates a leaderboard row.
    #[must_use]
    pub fn new(user: UserId, display_name: impl Into<String>, total: i64) -> Self {
        Self {
            user,
            display_name: display_name.into(),
            total,
        }
    }

    /// Returns the recipient identity.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the summed points.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.total
    }
}

/// Groups point rows by recipient and sums them.
///
/// Rows come back sorted by total descending; ties keep the order in which
/// a recipient first appears in the log (the sort is stable), so totals are
/// independent of award permutation while tie order stays deterministic.
#[must_use]
pub fn totals(points: &[PerformancePoint]) -> Vec<LeaderboardTotal> {
    let mut first_seen: Vec<UserId> = Vec::new();
    let mut sums: HashMap<UserId, i64> = HashMap::new();
    for point in points {
        let recipient = point.recipient();
        if !sums.contains_key(&recipient) {
            first_seen.push(recipient);
        }
        *sums.entry(recipient).or_insert(0) += i64::from(point.points());
    }
    let mut rows: Vec<LeaderboardTotal> = first_seen
        .into_iter()
        .map(|user| LeaderboardTotal {
            user,
            total: sums.get(&user).copied().unwrap_or_default(),
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}
