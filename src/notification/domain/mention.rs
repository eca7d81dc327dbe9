//! Mention token extraction from free-text comment bodies.

/// Extracts `@username` candidates from a comment body.
///
/// A candidate is `@` followed by one or more word characters (alphanumeric
/// or underscore). Candidates are returned in order of first appearance,
/// de-duplicated by exact token. Resolution against the user directory is
/// the caller's concern; unknown names are dropped there, not here.
///
/// # Examples
///
/// ```
/// use taskloom::notification::domain::mention_candidates;
///
/// let found = mention_candidates("@alice please sync with @bob, @alice");
/// assert_eq!(found, vec!["alice".to_owned(), "bob".to_owned()]);
/// ```
#[must_use]
pub fn mention_candidates(body: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '@' {
            continue;
        }
        let mut token = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                token.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !token.is_empty() && !candidates.contains(&token) {
            candidates.push(token);
        }
    }
    candidates
}
