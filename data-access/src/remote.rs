use std::time::Duration;

use reqwest::{Client, IntoUrl, Url};
use validation::UsernameSource;

use crate::Error;

/// Username list served over HTTP as a JSON array of strings, e.g. `GET /auth/usernames`.
#[derive(Clone, Debug)]
pub struct RemoteUsernames {
    client: Client,
    url: Url,
}

impl RemoteUsernames {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(url: impl IntoUrl) -> Result<Self, Error> {
        Self::with_timeout(url, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl IntoUrl, timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into_url()?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl UsernameSource for RemoteUsernames {
    type Error = Error;

    fn fetch_all_usernames(
        &self,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send {
        async move {
            let response = self.client.get(self.url.clone()).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::Status(status));
            }

            Ok(response.json::<Vec<String>>().await?)
        }
    }
}
