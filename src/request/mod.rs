//! Per-invocation scrape input

pub mod builder;

pub use builder::{ScrapeRequestBuilder, WithSelectors, WithUrl};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::ScrapeError;
use crate::selectors::{SelectorMap, validate_selectors};
use crate::utils::parse_target_url;

/// One scrape invocation: target, selectors and strategy controls.
///
/// Deserializes from the boundary shape
/// `{ url, selectors, timeoutMs?, forceDynamic? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    pub(crate) url: String,
    pub(crate) selectors: SelectorMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) timeout_ms: Option<u64>,
    #[serde(default)]
    pub(crate) force_dynamic: bool,
}

impl ScrapeRequest {
    /// Create a builder for a `ScrapeRequest`
    #[must_use]
    pub fn builder() -> ScrapeRequestBuilder<()> {
        ScrapeRequestBuilder::default()
    }

    /// Build a request from a URL and a raw selector specification
    pub fn from_raw(url: impl Into<String>, raw_selectors: &str) -> Result<Self, ScrapeError> {
        let selectors = validate_selectors(raw_selectors)?;
        Self::builder().url(url).selectors(selectors).build()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }

    #[must_use]
    pub fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    /// Per-attempt time bound, if the caller set one
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub fn force_dynamic(&self) -> bool {
        self.force_dynamic
    }

    /// Check the invariants a deserialized request may not satisfy.
    ///
    /// Returns the parsed target URL.
    pub fn validate(&self) -> Result<Url, ScrapeError> {
        if self.timeout_ms == Some(0) {
            return Err(ScrapeError::Validation(
                "timeoutMs must be a positive integer".to_string(),
            ));
        }
        parse_target_url(&self.url)
    }
}
