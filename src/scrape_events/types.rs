//! Event type definitions for the scrape event system

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::strategy::Strategy;

/// Why the coordinator abandoned the static attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// Static markup was fetched but produced zero records
    EmptyResult,
    /// Static attempt failed with a recoverable error
    Error { kind: String, message: String },
}

/// Events emitted during a scrape invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScrapeEvent {
    /// Emitted once the request passed validation
    ScrapeStarted {
        url: String,
        force_dynamic: bool,
        field_count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// Emitted before each strategy attempt
    StrategyChosen {
        url: String,
        strategy: Strategy,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// Emitted when the static attempt hands over to the dynamic one
    FallbackTriggered {
        url: String,
        reason: FallbackReason,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// Emitted after the extraction algorithm ran on a strategy's markup
    RecordsExtracted {
        url: String,
        strategy: Strategy,
        record_count: usize,
        markup_bytes: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// Emitted exactly once on success
    ScrapeCompleted {
        url: String,
        strategy: Strategy,
        record_count: usize,
        execution_time: Duration,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// Emitted exactly once on failure
    ScrapeFailed {
        url: String,
        cause: String,
        execution_time: Duration,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Helper functions for creating common events
impl ScrapeEvent {
    #[must_use]
    pub fn scrape_started(url: String, force_dynamic: bool, field_count: usize) -> Self {
        Self::ScrapeStarted {
            url,
            force_dynamic,
            field_count,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn strategy_chosen(url: String, strategy: Strategy) -> Self {
        Self::StrategyChosen {
            url,
            strategy,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn fallback_triggered(url: String, reason: FallbackReason) -> Self {
        Self::FallbackTriggered {
            url,
            reason,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn records_extracted(
        url: String,
        strategy: Strategy,
        record_count: usize,
        markup_bytes: usize,
    ) -> Self {
        Self::RecordsExtracted {
            url,
            strategy,
            record_count,
            markup_bytes,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn scrape_completed(
        url: String,
        strategy: Strategy,
        record_count: usize,
        execution_time: Duration,
    ) -> Self {
        Self::ScrapeCompleted {
            url,
            strategy,
            record_count,
            execution_time,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn scrape_failed(url: String, cause: String, execution_time: Duration) -> Self {
        Self::ScrapeFailed {
            url,
            cause,
            execution_time,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Target URL the event refers to
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::ScrapeStarted { url, .. }
            | Self::StrategyChosen { url, .. }
            | Self::FallbackTriggered { url, .. }
            | Self::RecordsExtracted { url, .. }
            | Self::ScrapeCompleted { url, .. }
            | Self::ScrapeFailed { url, .. } => url,
        }
    }
}
