//! Type-safe builder for `ScrapeRequest` using the typestate pattern
//!
//! `build()` only exists once both the URL and the selectors are set.

use std::marker::PhantomData;

use super::ScrapeRequest;
use crate::error::ScrapeError;
use crate::selectors::SelectorMap;

// Type states for the builder
pub struct WithUrl;
pub struct WithSelectors;

pub struct ScrapeRequestBuilder<State = ()> {
    url: Option<String>,
    selectors: Option<SelectorMap>,
    timeout_ms: Option<u64>,
    force_dynamic: bool,
    _phantom: PhantomData<State>,
}

impl Default for ScrapeRequestBuilder<()> {
    fn default() -> Self {
        Self {
            url: None,
            selectors: None,
            timeout_ms: None,
            force_dynamic: false,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeRequestBuilder<()> {
    pub fn url(self, url: impl Into<String>) -> ScrapeRequestBuilder<WithUrl> {
        ScrapeRequestBuilder {
            url: Some(url.into()),
            selectors: self.selectors,
            timeout_ms: self.timeout_ms,
            force_dynamic: self.force_dynamic,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeRequestBuilder<WithUrl> {
    pub fn selectors(self, selectors: SelectorMap) -> ScrapeRequestBuilder<WithSelectors> {
        ScrapeRequestBuilder {
            url: self.url,
            selectors: Some(selectors),
            timeout_ms: self.timeout_ms,
            force_dynamic: self.force_dynamic,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl ScrapeRequestBuilder<WithSelectors> {
    pub fn build(self) -> Result<ScrapeRequest, ScrapeError> {
        let request = ScrapeRequest {
            url: self
                .url
                .ok_or_else(|| ScrapeError::Validation("url is required".to_string()))?,
            selectors: self
                .selectors
                .ok_or_else(|| ScrapeError::Validation("selectors are required".to_string()))?,
            timeout_ms: self.timeout_ms,
            force_dynamic: self.force_dynamic,
        };
        request.validate()?;
        Ok(request)
    }
}

// Builder methods available at any state
impl<State> ScrapeRequestBuilder<State> {
    /// Bound each attempted strategy by `ms` instead of the configured default
    #[must_use]
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    /// Skip the static attempt and render directly
    #[must_use]
    pub fn force_dynamic(mut self, force: bool) -> Self {
        self.force_dynamic = force;
        self
    }
}
