//! User directory lookup contract.

use crate::notification::domain::UserRef;
use crate::task::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Read-only user directory lookup.
///
/// Username resolution is exact-match only; fuzzy and partial matching are
/// deliberately unsupported so mention behaviour stays predictable.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves an exact username to a user.
    ///
    /// Returns `None` when no user carries the name.
    async fn resolve_username(&self, username: &str) -> DirectoryResult<Option<UserRef>>;

    /// Looks a user up by identity.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<UserRef>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Lookup-layer failure.
    #[error("directory error: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
