//! Success/failure envelope returned to the trigger collaborator

use serde::Serialize;
use std::time::Duration;

use super::{ScrapeOutcome, elapsed_ms};
use crate::error::ScrapeError;
use crate::extraction::ScrapedRecord;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ScrapedRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub execution_time: u64,
    pub items_count: usize,
}

impl ExecutionResponse {
    #[must_use]
    pub fn success(outcome: &ScrapeOutcome) -> Self {
        Self {
            success: true,
            data: Some(outcome.records.clone()),
            error: None,
            execution_time: outcome.execution_time_ms,
            items_count: outcome.items_count(),
        }
    }

    /// Failure envelope. Never carries partial data.
    #[must_use]
    pub fn failure(error: &ScrapeError, elapsed: Duration) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            execution_time: elapsed_ms(elapsed),
            items_count: 0,
        }
    }

    /// `elapsed` is only used on failure; an outcome carries its own time
    #[must_use]
    pub fn from_result(result: &Result<ScrapeOutcome, ScrapeError>, elapsed: Duration) -> Self {
        match result {
            Ok(outcome) => Self::success(outcome),
            Err(error) => Self::failure(error, elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;

    #[test]
    fn failure_has_no_data_and_zero_items() {
        let err = ScrapeError::failed("https://example.com", ScrapeError::Fetch("HTTP 500".into()));
        let response = ExecutionResponse::failure(&err, Duration::from_millis(7));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": "Failed to scrape https://example.com: HTTP 500",
                "executionTime": 7,
                "itemsCount": 0
            })
        );
    }

    #[test]
    fn success_copies_outcome_counts() {
        let outcome = ScrapeOutcome {
            records: Vec::new(),
            strategy_used: Strategy::Static,
            execution_time_ms: 3,
        };
        let response = ExecutionResponse::from_result(&Ok(outcome), Duration::from_secs(9));
        assert!(response.success);
        assert_eq!(response.execution_time, 3);
        assert_eq!(response.data.as_deref().map(<[_]>::len), Some(0));
    }
}
