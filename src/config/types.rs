//! Core configuration types for adaptive scraping

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use super::builder::ScraperConfigBuilder;
use crate::scrape_events::ScrapeEventBus;

/// Ambient configuration for the static fetcher, the dynamic renderer and
/// the coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ScraperConfigBuilder")]
pub struct ScraperConfig {
    /// Time bound for the static GET when the request has none
    ///
    /// Default: 30 000 ms
    pub(crate) static_timeout_ms: u64,

    /// Time bound for navigation plus network idle when the request has none
    ///
    /// Default: 60 000 ms
    pub(crate) dynamic_timeout_ms: u64,

    /// Fixed delay after network idle for lazily inserted content
    ///
    /// Default: 2 000 ms
    pub(crate) settle_delay_ms: u64,

    /// Quiet period with zero in-flight requests that counts as idle
    ///
    /// Default: 500 ms
    pub(crate) network_idle_window_ms: u64,

    /// Element waited for before capture. A timeout here is logged, not fatal.
    pub(crate) ready_selector: Option<String>,
    pub(crate) ready_timeout_ms: u64,

    pub(crate) user_agent: String,
    pub(crate) accept: String,
    pub(crate) accept_language: String,

    pub(crate) viewport_width: u32,
    pub(crate) viewport_height: u32,

    pub(crate) headless: bool,

    /// Explicit Chrome/Chromium executable. Falls back to `CHROMIUM_PATH`,
    /// well-known install paths, then a managed download.
    pub(crate) chrome_executable: Option<PathBuf>,

    /// Parent directory for per-session Chrome profiles (default: temp dir)
    pub(crate) profile_root: Option<PathBuf>,

    /// Optional event bus for publishing scrape events
    #[serde(skip)]
    pub(crate) event_bus: Option<Arc<ScrapeEventBus>>,
}
