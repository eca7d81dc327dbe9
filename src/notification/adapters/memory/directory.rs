//! In-memory user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::notification::domain::UserRef;
use crate::notification::ports::{DirectoryError, DirectoryResult, UserDirectory};
use crate::task::domain::UserId;

/// Thread-safe in-memory user directory keyed by exact username.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<HashMap<String, UserRef>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user and returns the stored projection.
    ///
    /// # Errors
    ///
    /// Returns a lookup error when the state lock is poisoned.
    pub fn register(
        &self,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> DirectoryResult<UserRef> {
        let name = username.into();
        let user = UserRef::new(UserId::new(), name.clone(), display_name);
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        state.insert(name, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn resolve_username(&self, username: &str) -> DirectoryResult<Option<UserRef>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(state.get(username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<UserRef>> {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(state.values().find(|user| user.id() == id).cloned())
    }
}
