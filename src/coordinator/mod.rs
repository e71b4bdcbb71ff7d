//! Static-first, dynamic-fallback coordination
//!
//! Start -> StaticAttempt -> (Success | Fallback) -> DynamicAttempt -> (Success | Failure)
//!
//! `force_dynamic` skips the static stage. Whatever the dynamic stage returns
//! is final. There are no retries of the same strategy.

mod attempt;

pub use attempt::AttemptOutcome;

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extraction::{ScrapedRecord, extract};
use crate::outcome::{ScrapeOutcome, normalize};
use crate::renderer::DynamicRenderer;
use crate::request::ScrapeRequest;
use crate::scrape_events::{EventBusError, FallbackReason, ScrapeEvent, ScrapeEventBus};
use crate::static_fetcher::StaticFetcher;
use crate::strategy::{MarkupSource, Strategy};

/// Runs a request through the static and dynamic markup sources
pub struct StrategyCoordinator<S, D> {
    static_source: S,
    dynamic_source: D,
    event_bus: Option<Arc<ScrapeEventBus>>,
}

impl StrategyCoordinator<StaticFetcher, DynamicRenderer> {
    /// Coordinator over the real HTTP fetcher and headless renderer
    pub fn from_config(config: ScraperConfig) -> Result<Self, ScrapeError> {
        let static_source = StaticFetcher::new(&config)?;
        let event_bus = config.event_bus().cloned();
        Ok(Self::new(static_source, DynamicRenderer::new(config)).with_event_bus(event_bus))
    }
}

impl<S, D> StrategyCoordinator<S, D>
where
    S: MarkupSource,
    D: MarkupSource,
{
    pub fn new(static_source: S, dynamic_source: D) -> Self {
        Self {
            static_source,
            dynamic_source,
            event_bus: None,
        }
    }

    #[must_use]
    pub fn with_event_bus(mut self, event_bus: Option<Arc<ScrapeEventBus>>) -> Self {
        self.event_bus = event_bus;
        self
    }

    pub fn event_bus(&self) -> Option<&Arc<ScrapeEventBus>> {
        self.event_bus.as_ref()
    }

    /// Scrape `request`.
    ///
    /// Returns every record from exactly one strategy, or a single
    /// `ScrapeError::Failed` naming the URL and the innermost cause. Never both.
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeOutcome, ScrapeError> {
        let start = Instant::now();

        let url = match request.validate() {
            Ok(url) => url,
            Err(e) => {
                let err = ScrapeError::failed(request.url(), e);
                self.finish_failed(request, &err, start).await;
                return Err(err);
            }
        };

        self.emit(ScrapeEvent::scrape_started(
            request.url().to_string(),
            request.force_dynamic(),
            request.selectors().field_count(),
        ))
        .await;

        match self.run(&url, request).await {
            Ok((records, strategy)) => {
                let outcome = normalize(records, strategy, start);
                info!(
                    "Scraped {} records from {} via {} in {}ms",
                    outcome.items_count(),
                    request.url(),
                    strategy,
                    outcome.execution_time_ms
                );
                self.emit(ScrapeEvent::scrape_completed(
                    request.url().to_string(),
                    strategy,
                    outcome.items_count(),
                    outcome.execution_time(),
                ))
                .await;
                Ok(outcome)
            }
            Err(err) => {
                self.finish_failed(request, &err, start).await;
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        url: &Url,
        request: &ScrapeRequest,
    ) -> Result<(Vec<ScrapedRecord>, Strategy), ScrapeError> {
        let mut static_failure = None;

        if request.force_dynamic() {
            debug!("force_dynamic set, skipping static attempt for {url}");
        } else {
            let reason = match self.attempt(&self.static_source, url, request).await {
                AttemptOutcome::Records(records) => {
                    if records.iter().all(ScrapedRecord::is_all_null) {
                        info!(
                            "Every static record for {url} is empty, the page may need force_dynamic"
                        );
                    }
                    return Ok((records, self.static_source.strategy()));
                }
                AttemptOutcome::Empty => {
                    info!("Static markup of {url} yielded no records, falling back to dynamic");
                    FallbackReason::EmptyResult
                }
                AttemptOutcome::Failed(e) => {
                    warn!("Static attempt for {url} failed, falling back to dynamic: {e}");
                    let reason = FallbackReason::Error {
                        kind: e.kind().to_string(),
                        message: e.to_string(),
                    };
                    static_failure = Some(e);
                    reason
                }
            };
            self.emit(ScrapeEvent::fallback_triggered(request.url().to_string(), reason))
                .await;
        }

        let strategy = self.dynamic_source.strategy();
        match self.attempt(&self.dynamic_source, url, request).await {
            AttemptOutcome::Records(records) => Ok((records, strategy)),
            AttemptOutcome::Empty => Ok((Vec::new(), strategy)),
            AttemptOutcome::Failed(e) => Err(ScrapeError::failed_after_fallback(
                request.url(),
                e,
                static_failure,
            )),
        }
    }

    async fn attempt<M: MarkupSource>(
        &self,
        source: &M,
        url: &Url,
        request: &ScrapeRequest,
    ) -> AttemptOutcome {
        let strategy = source.strategy();
        let timeout = request.timeout().unwrap_or_else(|| source.default_timeout());

        debug!("Attempting {strategy} strategy for {url} (timeout {}ms)", timeout.as_millis());
        self.emit(ScrapeEvent::strategy_chosen(request.url().to_string(), strategy))
            .await;

        let markup = match source.fetch(url, timeout).await {
            Ok(markup) => markup,
            Err(e) => return AttemptOutcome::Failed(e),
        };

        let extracted = extract(&markup, request.selectors());
        if let Ok(records) = &extracted {
            self.emit(ScrapeEvent::records_extracted(
                request.url().to_string(),
                strategy,
                records.len(),
                markup.len(),
            ))
            .await;
        }
        AttemptOutcome::from(extracted)
    }

    async fn finish_failed(&self, request: &ScrapeRequest, err: &ScrapeError, start: Instant) {
        error!("{err}");
        self.emit(ScrapeEvent::scrape_failed(
            request.url().to_string(),
            err.root_cause().to_string(),
            start.elapsed(),
        ))
        .await;
    }

    /// Publish to the bus if one is attached. Never fails the scrape.
    async fn emit(&self, event: ScrapeEvent) {
        let Some(bus) = &self.event_bus else {
            return;
        };
        match bus.publish(event).await {
            Ok(_) | Err(EventBusError::NoSubscribers) => {}
            Err(e) => warn!("Failed to publish scrape event: {e}"),
        }
    }
}
