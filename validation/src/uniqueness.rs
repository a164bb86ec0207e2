use std::fmt::Display;

use crate::UsernameSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conflict {
    UsernameExists,
}

impl Conflict {
    /// The key a form framework expects in its error mapping.
    pub fn key(&self) -> &'static str {
        match self {
            Conflict::UsernameExists => "usernameExists",
        }
    }
}

impl Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conflict::UsernameExists => write!(f, "username already exists"),
        }
    }
}

/// Case-insensitive membership test. Stops at the first match.
///
/// Both sides go through [`str::to_lowercase`] and nothing else: no trimming,
/// no whitespace folding, no locale-aware collation. An empty candidate is
/// compared like any other string.
pub fn find_conflict<I>(candidate: &str, usernames: I) -> Option<Conflict>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let candidate = candidate.to_lowercase();

    usernames
        .into_iter()
        .any(|username| username.as_ref().to_lowercase() == candidate)
        .then_some(Conflict::UsernameExists)
}

/// Fetches every known username from `source` and tests `candidate` against them.
///
/// Issues exactly one read per call. A failing `source` fails the check with
/// the source's own error: there is no retry and no fallback list.
#[tracing::instrument(fields(%candidate), skip_all, ret, err)]
pub async fn check<S>(candidate: &str, source: &S) -> Result<Option<Conflict>, S::Error>
where
    S: UsernameSource + ?Sized,
{
    let usernames = source.fetch_all_usernames().await?;
    tracing::debug!(count = usernames.len(), "fetched usernames");

    Ok(find_conflict(candidate, &usernames))
}
