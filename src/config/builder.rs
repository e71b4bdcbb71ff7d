//! Fluent builder for `ScraperConfig`
//!
//! Every field is optional and falls back to the defaults in
//! [`crate::utils::constants`].

use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::types::ScraperConfig;
use crate::scrape_events::ScrapeEventBus;
use crate::utils::{
    CHROME_USER_AGENT, DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_DYNAMIC_TIMEOUT_MS,
    DEFAULT_NETWORK_IDLE_WINDOW_MS, DEFAULT_READY_SELECTOR, DEFAULT_READY_TIMEOUT_MS,
    DEFAULT_SETTLE_DELAY_MS, DEFAULT_STATIC_TIMEOUT_MS, DEFAULT_VIEWPORT_HEIGHT,
    DEFAULT_VIEWPORT_WIDTH,
};

/// Also the deserialization shape of `ScraperConfig`: missing keys take the
/// defaults and the result goes through [`ScraperConfigBuilder::build`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfigBuilder {
    static_timeout_ms: u64,
    dynamic_timeout_ms: u64,
    settle_delay_ms: u64,
    network_idle_window_ms: u64,
    ready_selector: Option<String>,
    ready_timeout_ms: u64,
    user_agent: String,
    accept: String,
    accept_language: String,
    viewport_width: u32,
    viewport_height: u32,
    headless: bool,
    chrome_executable: Option<PathBuf>,
    profile_root: Option<PathBuf>,
    #[serde(skip)]
    event_bus: Option<Arc<ScrapeEventBus>>,
}

impl Default for ScraperConfigBuilder {
    fn default() -> Self {
        Self {
            static_timeout_ms: DEFAULT_STATIC_TIMEOUT_MS,
            dynamic_timeout_ms: DEFAULT_DYNAMIC_TIMEOUT_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            network_idle_window_ms: DEFAULT_NETWORK_IDLE_WINDOW_MS,
            ready_selector: Some(DEFAULT_READY_SELECTOR.to_string()),
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            user_agent: CHROME_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            headless: true,
            chrome_executable: None,
            profile_root: None,
            event_bus: None,
        }
    }
}

impl ScraperConfig {
    /// Create a builder for configuring a `ScraperConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScraperConfigBuilder {
        ScraperConfigBuilder::default()
    }
}

impl TryFrom<ScraperConfigBuilder> for ScraperConfig {
    type Error = anyhow::Error;

    fn try_from(builder: ScraperConfigBuilder) -> Result<Self> {
        builder.build()
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfigBuilder::default().assemble(true)
    }
}

impl ScraperConfigBuilder {
    #[must_use]
    pub fn static_timeout_ms(mut self, ms: u64) -> Self {
        self.static_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn dynamic_timeout_ms(mut self, ms: u64) -> Self {
        self.dynamic_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn network_idle_window_ms(mut self, ms: u64) -> Self {
        self.network_idle_window_ms = ms;
        self
    }

    /// Element to wait for before capture; `None` skips the wait
    #[must_use]
    pub fn ready_selector(mut self, selector: Option<impl Into<String>>) -> Self {
        self.ready_selector = selector.map(Into::into);
        self
    }

    #[must_use]
    pub fn ready_timeout_ms(mut self, ms: u64) -> Self {
        self.ready_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// `Accept` header of the static GET
    #[must_use]
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }

    #[must_use]
    pub fn accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.accept_language = accept_language.into();
        self
    }

    #[must_use]
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    #[must_use]
    pub fn profile_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.profile_root = Some(dir.into());
        self
    }

    #[must_use]
    pub fn event_bus(mut self, bus: Arc<ScrapeEventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn build(self) -> Result<ScraperConfig> {
        if self.static_timeout_ms == 0 {
            return Err(anyhow!("static_timeout_ms must be positive"));
        }
        if self.dynamic_timeout_ms == 0 {
            return Err(anyhow!("dynamic_timeout_ms must be positive"));
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(anyhow!(
                "viewport must be non-empty, got {}x{}",
                self.viewport_width,
                self.viewport_height
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(anyhow!("user_agent must not be empty"));
        }
        if self.accept.trim().is_empty() {
            return Err(anyhow!("accept must not be empty"));
        }

        // Enforce headless mode in release builds for production safety
        #[cfg(not(debug_assertions))]
        let headless = if !self.headless {
            tracing::warn!(
                "Forcing headless mode in release build. \
                Headed mode is only available in debug builds for development."
            );
            true
        } else {
            self.headless
        };

        #[cfg(debug_assertions)]
        let headless = self.headless;

        Ok(self.assemble(headless))
    }

    fn assemble(self, headless: bool) -> ScraperConfig {
        ScraperConfig {
            static_timeout_ms: self.static_timeout_ms,
            dynamic_timeout_ms: self.dynamic_timeout_ms,
            settle_delay_ms: self.settle_delay_ms,
            network_idle_window_ms: self.network_idle_window_ms,
            ready_selector: self.ready_selector,
            ready_timeout_ms: self.ready_timeout_ms,
            user_agent: self.user_agent,
            accept: self.accept,
            accept_language: self.accept_language,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            headless,
            chrome_executable: self.chrome_executable,
            profile_root: self.profile_root,
            event_bus: self.event_bus,
        }
    }
}
