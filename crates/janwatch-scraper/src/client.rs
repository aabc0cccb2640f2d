use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;

/// HTTP client for the target site's pages.
///
/// One timed GET per call, with a fixed identifying user agent. There is
/// deliberately no retry layer anywhere: a failed fetch fails the whole
/// identifier for this run, and the next run tries again.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the configured timeout ceiling and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one page and returns its body text.
    ///
    /// The connection is released on every exit path — success, transport
    /// error, or timeout — by dropping the response.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] — transport-level failure (timeout, DNS,
    ///   connection reset), or a body that cannot be read.
    /// - [`ScrapeError::UnexpectedStatus`] — any non-2xx status.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
