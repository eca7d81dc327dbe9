//! User directory projection consumed by the collaboration engine.

use crate::task::domain::UserId;
use serde::{Deserialize, Serialize};

/// The slice of a directory user this engine needs: identity, the exact
/// username mentions resolve against, and the display name the leaderboard
/// shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    id: UserId,
    username: String,
    display_name: String,
}

impl UserRef {
    /// Creates a user projection.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
        }
    }

    /// Returns the user identity.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the exact username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
