//! Mention resolution against the user directory.

use crate::notification::domain::{UserRef, mention_candidates};
use crate::notification::ports::{DirectoryResult, UserDirectory};
use crate::task::domain::UserId;
use std::sync::Arc;

/// Resolves `@username` tokens in comment text to user identities.
#[derive(Clone)]
pub struct MentionResolver<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
}

impl<D> MentionResolver<D>
where
    D: UserDirectory,
{
    /// Creates a new mention resolver.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Resolves the mentions in a comment body.
    ///
    /// Candidates are taken in order of first appearance and resolved by
    /// exact username match; tokens that resolve to nothing are silently
    /// dropped, as is the comment's own author even when self-mentioned.
    /// The result is de-duplicated by identity.
    ///
    /// # Errors
    ///
    /// Returns a directory error when a lookup fails; an unresolvable name
    /// is not an error.
    pub async fn resolve(&self, author: UserId, body: &str) -> DirectoryResult<Vec<UserRef>> {
        let mut resolved: Vec<UserRef> = Vec::new();
        for candidate in mention_candidates(body) {
            let Some(user) = self.directory.resolve_username(&candidate).await? else {
                continue;
            };
            if user.id() == author {
                continue;
            }
            if resolved.iter().any(|seen| seen.id() == user.id()) {
                continue;
            }
            resolved.push(user);
        }
        Ok(resolved)
    }
}
