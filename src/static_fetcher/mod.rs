//! Static strategy: one plain HTTP GET
//!
//! Sends browser-like identity headers to get past trivial bot blocking.
//! Exactly one attempt per call; retrying is the coordinator's business
//! (and it does not retry the same strategy).

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::strategy::{MarkupSource, Strategy};

/// HTTP GET markup source
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl StaticFetcher {
    /// Build a fetcher whose client carries the configured identity headers
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value("Accept", config.accept())?);
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("Accept-Language", config.accept_language())?,
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ScrapeError::Fetch(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            default_timeout: config.static_timeout(),
        })
    }

    /// GET `url` and return the response body as text.
    ///
    /// Fails with `ScrapeError::Fetch` on connection failure, on timeout
    /// (covering connect through end of body) and on any non-2xx status.
    pub async fn fetch_static(&self, url: &Url, timeout: Duration) -> Result<String, ScrapeError> {
        info!("Static fetch: {url}");

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_request_error(url, timeout, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Fetch(format!("HTTP {status} from {url}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_request_error(url, timeout, &e))?;

        debug!("Static fetch returned {} bytes from {url}", body.len());
        Ok(body)
    }
}

impl MarkupSource for StaticFetcher {
    fn strategy(&self) -> Strategy {
        Strategy::Static
    }

    fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<String, ScrapeError> {
        self.fetch_static(url, timeout).await
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ScrapeError> {
    HeaderValue::from_str(value)
        .map_err(|e| ScrapeError::Validation(format!("Invalid {name} header value: {e}")))
}

fn classify_request_error(url: &Url, timeout: Duration, err: &reqwest::Error) -> ScrapeError {
    if err.is_timeout() {
        return ScrapeError::Fetch(format!(
            "Request to {url} timed out after {}ms",
            timeout.as_millis()
        ));
    }
    if err.is_connect() {
        return ScrapeError::Fetch(format!(
            "Connection to {url} failed: {}",
            innermost_message(err)
        ));
    }
    ScrapeError::Fetch(format!("Request to {url} failed: {}", innermost_message(err)))
}

/// Message of the deepest error in the `source()` chain
fn innermost_message(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
