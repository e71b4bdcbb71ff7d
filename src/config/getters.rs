//! Getter methods for `ScraperConfig`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::types::ScraperConfig;
use crate::scrape_events::ScrapeEventBus;

impl ScraperConfig {
    #[must_use]
    pub fn static_timeout(&self) -> Duration {
        Duration::from_millis(self.static_timeout_ms)
    }

    #[must_use]
    pub fn dynamic_timeout(&self) -> Duration {
        Duration::from_millis(self.dynamic_timeout_ms)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn network_idle_window(&self) -> Duration {
        Duration::from_millis(self.network_idle_window_ms)
    }

    #[must_use]
    pub fn ready_selector(&self) -> Option<&str> {
        self.ready_selector.as_deref()
    }

    #[must_use]
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn accept(&self) -> &str {
        &self.accept
    }

    #[must_use]
    pub fn accept_language(&self) -> &str {
        &self.accept_language
    }

    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_executable(&self) -> Option<&PathBuf> {
        self.chrome_executable.as_ref()
    }

    #[must_use]
    pub fn profile_root(&self) -> Option<&PathBuf> {
        self.profile_root.as_ref()
    }

    #[must_use]
    pub fn event_bus(&self) -> Option<&Arc<ScrapeEventBus>> {
        self.event_bus.as_ref()
    }
}
