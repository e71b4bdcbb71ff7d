//! Dynamic strategy: render the page in an isolated headless browser
//!
//! Every call launches its own browser on a throwaway profile, so no cookies,
//! storage or cache leak between invocations. The session is released before
//! the result (or error) is handed back.

pub mod browser_setup;
pub mod network_idle;
pub mod profile;
pub mod session;

pub use browser_setup::{
    CHROMIUM_PATH_ENV, download_managed_browser, find_browser_executable,
    resolve_browser_executable,
};
pub use profile::BrowserProfile;
pub use session::RenderSession;

use std::time::Duration;
use tracing::info;
use url::Url;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::strategy::{MarkupSource, Strategy};

/// Headless-browser markup source
#[derive(Debug, Clone)]
pub struct DynamicRenderer {
    config: ScraperConfig,
}

impl DynamicRenderer {
    #[must_use]
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Launch a session, render `url`, release the session, return the markup
    pub async fn render(&self, url: &Url, timeout: Duration) -> Result<String, ScrapeError> {
        info!("Dynamic render: {url}");

        let session = RenderSession::launch(&self.config, timeout).await?;
        let result = session.render(url, timeout, &self.config).await;
        session.close().await;

        result
    }
}

impl MarkupSource for DynamicRenderer {
    fn strategy(&self) -> Strategy {
        Strategy::Dynamic
    }

    fn default_timeout(&self) -> Duration {
        self.config.dynamic_timeout()
    }

    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<String, ScrapeError> {
        self.render(url, timeout).await
    }
}
