pub mod config;
pub mod coordinator;
pub mod error;
pub mod extraction;
pub mod outcome;
pub mod renderer;
pub mod request;
pub mod scrape_events;
pub mod selectors;
pub mod static_fetcher;
pub mod strategy;
pub mod utils;

pub use config::{ScraperConfig, ScraperConfigBuilder};
pub use coordinator::{AttemptOutcome, StrategyCoordinator};
pub use error::{ScrapeError, ScrapeResult};
pub use extraction::{ScrapedRecord, extract};
pub use outcome::{
    ExecutionResponse, RunRecord, RunStatus, ScrapeOutcome, ScraperStats, normalize,
};
pub use renderer::{DynamicRenderer, download_managed_browser, find_browser_executable};
pub use request::{ScrapeRequest, ScrapeRequestBuilder};
pub use scrape_events::{FallbackReason, ScrapeEvent, ScrapeEventBus};
pub use selectors::{SelectorMap, validate_selectors};
pub use static_fetcher::StaticFetcher;
pub use strategy::{MarkupSource, Strategy};

/// Scrape `request` with the real static fetcher and headless renderer
pub async fn scrape(
    request: &ScrapeRequest,
    config: ScraperConfig,
) -> Result<ScrapeOutcome, ScrapeError> {
    let coordinator = StrategyCoordinator::from_config(config)?;
    coordinator.scrape(request).await
}
