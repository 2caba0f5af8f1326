//! HTTP fetching for page-loader
//!
//! A thin wrapper over a configured `reqwest::Client`. The client is an
//! explicit object with a lifecycle scoped to one invocation of the
//! pipeline; nothing here is global.

use std::time::Duration;

use bytes::Bytes;
use log::debug;
use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::core::error::{Error, Result};

/// Overall request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client used for the page and every asset of one run
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with the default timeouts and user agent.
    pub fn new() -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("page-loader/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Performs one GET round trip and returns the response body.
    ///
    /// Connection-level failures map to `Error::NetworkError`, non-2xx
    /// responses to `Error::HttpStatusError`. No retries.
    pub async fn fetch(&self, url: &Url) -> Result<Bytes> {
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
