#[cfg(feature = "remote")]
mod remote;
#[cfg(feature = "remote")]
pub use remote::RemoteUsernames;

use sqlx::SqlitePool;
use validation::UsernameSource;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    #[cfg(feature = "remote")]
    #[error("{0}")]
    Remote(#[from] reqwest::Error),

    #[cfg(feature = "remote")]
    #[error("unexpected status from username source :: {0}")]
    Status(reqwest::StatusCode),
}

/// Reads straight from the database on every call. Nothing is cached, so a
/// username inserted a moment ago is visible to the very next check.
#[derive(Clone)]
pub struct DataAccess {
    pool: SqlitePool,
}

impl DataAccess {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn read<'conn, V, Fut>(
        &'conn self,
        query: impl FnOnce(&'conn SqlitePool) -> Fut,
    ) -> Result<V, Error>
    where
        Fut: Future<Output = Result<V, sqlx::Error>>,
    {
        Ok(query(&self.pool).await?)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    pub async fn all_usernames(&self) -> Result<Vec<String>, Error> {
        let usernames = self
            .read(|pool| {
                sqlx::query_scalar::<_, String>("SELECT username FROM users ORDER BY id")
                    .fetch_all(pool)
            })
            .await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(count = usernames.len(), "read usernames");

        Ok(usernames)
    }
}

impl UsernameSource for DataAccess {
    type Error = Error;

    fn fetch_all_usernames(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send {
        self.all_usernames()
    }
}
