use std::convert::Infallible;

/// Supplies the complete, current set of usernames.
///
/// Every call is a fresh read. Callers never cache what it returns, so an
/// implementation that wants caching has to do it itself.
pub trait UsernameSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_all_usernames(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

impl UsernameSource for Vec<String> {
    type Error = Infallible;

    fn fetch_all_usernames(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send {
        let usernames = self.clone();
        async move { Ok(usernames) }
    }
}
