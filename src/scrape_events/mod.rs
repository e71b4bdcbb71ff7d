//! Event system for observing scrape invocations
//!
//! The coordinator publishes a `ScrapeEvent` at each decision point (strategy
//! chosen, fallback triggered, records extracted, completion, failure).
//! Instrumentation subscribes to the bus instead of scraping log output.

pub mod bus;
pub mod errors;
pub mod metrics;
pub mod types;

pub use bus::ScrapeEventBus;
pub use errors::EventBusError;
pub use metrics::{EventBusMetrics, MetricsSnapshot};
pub use types::{FallbackReason, ScrapeEvent};
