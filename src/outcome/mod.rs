//! Outcome normalization: the boundary-facing shapes of a scrape
//!
//! [`normalize`] turns extracted records into a [`ScrapeOutcome`].
//! [`ExecutionResponse`] and [`RunRecord`] are the envelopes handed to the
//! trigger and persistence collaborators. Nothing here performs I/O.

pub mod response;
pub mod run_record;

pub use response::ExecutionResponse;
pub use run_record::{RunRecord, RunStatus, ScraperStats};

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::extraction::ScrapedRecord;
use crate::strategy::Strategy;

/// Successful scrape: records, the strategy that produced them, wall-clock time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOutcome {
    pub records: Vec<ScrapedRecord>,
    pub strategy_used: Strategy,
    pub execution_time_ms: u64,
}

impl ScrapeOutcome {
    #[must_use]
    pub fn items_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn execution_time(&self) -> Duration {
        Duration::from_millis(self.execution_time_ms)
    }
}

/// Stamp `records` with the strategy used and the time elapsed since `start`
#[must_use]
pub fn normalize(records: Vec<ScrapedRecord>, strategy: Strategy, start: Instant) -> ScrapeOutcome {
    ScrapeOutcome {
        records,
        strategy_used: strategy,
        execution_time_ms: elapsed_ms(start.elapsed()),
    }
}

/// Saturating millisecond count
pub(crate) fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_camel_case() {
        let outcome = ScrapeOutcome {
            records: Vec::new(),
            strategy_used: Strategy::Dynamic,
            execution_time_ms: 12,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"records": [], "strategyUsed": "dynamic", "executionTimeMs": 12})
        );
    }

    #[test]
    fn normalize_measures_from_start() {
        let start = Instant::now() - Duration::from_millis(50);
        let outcome = normalize(Vec::new(), Strategy::Static, start);
        assert!(outcome.execution_time_ms >= 50);
        assert_eq!(outcome.strategy_used, Strategy::Static);
    }
}
