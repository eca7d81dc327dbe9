//! Performance point record and the difficulty scoring table.

use crate::task::domain::{Difficulty, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a performance point record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformancePointId(Uuid);

impl PerformancePointId {
    /// Creates a new random performance point identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a performance point identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for PerformancePointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PerformancePointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Points awarded for completing a task of the given difficulty.
///
/// The table is fixed at build time and not configurable at runtime.
#[must_use]
pub const fn points_for(difficulty: Difficulty) -> i32 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 20,
        Difficulty::Hard => 30,
    }
}

/// One immutable award of points to a user for one completed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformancePoint {
    id: PerformancePointId,
    recipient: UserId,
    task_id: TaskId,
    points: i32,
    reason: String,
    created_at: DateTime<Utc>,
}

impl PerformancePoint {
    /// Creates a new performance point record.
    #[must_use]
    pub fn new(
        recipient: UserId,
        task_id: TaskId,
        points: i32,
        reason: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PerformancePointId::new(),
            recipient,
            task_id,
            points,
            reason: reason.into(),
            created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> PerformancePointId {
        self.id
    }

    /// Returns the identity the points were awarded to.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the completed task the award references.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the awarded points.
    #[must_use]
    pub const fn points(&self) -> i32 {
        self.points
    }

    /// Returns the reviewer's free-text reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the award timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
