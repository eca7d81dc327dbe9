//! Task status, difficulty, and operation enumerations.

use super::{ParseDifficultyError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but not handed to anyone.
    Pending,
    /// Task is held by an assignee (or awaiting one after a rejection).
    Assigned,
    /// Task is being worked on by the assignee.
    InProgress,
    /// Task is awaiting review by the creator.
    UnderReview,
    /// Task has been reviewed and scored.
    Completed,
    /// Task ran past its deadline before completion.
    Expired,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::UnderReview => "under_review",
            Self::Completed => "completed",
            Self::Expired => "expired",
        }
    }

    /// Returns `true` for statuses no deadline trigger can expire.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Expired)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "under_review" => Ok(Self::UnderReview),
            "completed" => Ok(Self::Completed),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task difficulty grade, fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Routine work.
    Easy,
    /// Work of ordinary complexity.
    Medium,
    /// Work requiring sustained effort.
    Hard,
}

impl Difficulty {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = ParseDifficultyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(value.to_owned())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle operation names used in guard violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOperation {
    /// Hand the task to an assignee.
    Assign,
    /// Clear the current assignee.
    Unassign,
    /// Assignee accepts the assignment.
    Accept,
    /// Assignee declines the assignment.
    Reject,
    /// Assignee submits the work for review.
    Finish,
    /// Creator sends the work back for revision.
    ReturnForRevision,
    /// Creator accepts the work and awards points.
    Complete,
    /// Deadline trigger expires the task.
    Expire,
}

impl TaskOperation {
    /// Returns the canonical operation label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Unassign => "unassign",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Finish => "finish",
            Self::ReturnForRevision => "return_for_revision",
            Self::Complete => "complete",
            Self::Expire => "expire",
        }
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
