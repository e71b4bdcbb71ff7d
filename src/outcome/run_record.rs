//! Immutable run record and scraper statistics for the persistence collaborator

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ScrapeOutcome, elapsed_ms};
use crate::error::ScrapeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Success,
    Failed,
}

impl RunStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }
}

/// One execution of a scraper configuration, as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub scraper_id: String,
    pub status: RunStatus,
    /// Records serialized as JSON text, `[]` on failure
    pub data: String,
    pub items_count: usize,
    /// Milliseconds
    pub execution_time: u64,
    /// RFC 3339
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RunRecord {
    pub fn success(
        scraper_id: impl Into<String>,
        outcome: &ScrapeOutcome,
        at: DateTime<Utc>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            scraper_id: scraper_id.into(),
            status: RunStatus::Success,
            data: serde_json::to_string(&outcome.records)?,
            items_count: outcome.items_count(),
            execution_time: outcome.execution_time_ms,
            timestamp: rfc3339(at),
            error_message: None,
        })
    }

    #[must_use]
    pub fn failure(
        scraper_id: impl Into<String>,
        error: &ScrapeError,
        elapsed: Duration,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            scraper_id: scraper_id.into(),
            status: RunStatus::Failed,
            data: "[]".to_string(),
            items_count: 0,
            execution_time: elapsed_ms(elapsed),
            timestamp: rfc3339(at),
            error_message: Some(error.to_string()),
        }
    }

    pub fn from_result(
        scraper_id: impl Into<String>,
        result: &Result<ScrapeOutcome, ScrapeError>,
        elapsed: Duration,
        at: DateTime<Utc>,
    ) -> Result<Self, serde_json::Error> {
        match result {
            Ok(outcome) => Self::success(scraper_id, outcome, at),
            Err(error) => Ok(Self::failure(scraper_id, error, elapsed, at)),
        }
    }

    /// Display title: `Result: <name> - <timestamp>` or `Error: <name> - <timestamp>`
    #[must_use]
    pub fn title(&self, scraper_name: &str) -> String {
        let prefix = match self.status {
            RunStatus::Success => "Result",
            RunStatus::Failed => "Error",
        };
        format!("{prefix}: {scraper_name} - {}", self.timestamp)
    }
}

/// Cumulative counters kept on a scraper configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperStats {
    pub total_runs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
}

impl ScraperStats {
    /// Count a run, failed or not
    pub fn record_run(&mut self, at: DateTime<Utc>) {
        self.total_runs = self.total_runs.saturating_add(1);
        self.last_run = Some(rfc3339(at));
    }
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn failure_record_stores_empty_data() {
        let err = ScrapeError::failed("https://x.test", ScrapeError::Render("boom".into()));
        let record = RunRecord::failure("scr-1", &err, Duration::from_millis(40), fixed_time());

        assert_eq!(record.status, RunStatus::Failed);
        assert_eq!(record.data, "[]");
        assert_eq!(record.timestamp, "2024-05-01T12:00:00.000Z");
        assert_eq!(record.error_message.as_deref(), Some("Failed to scrape https://x.test: boom"));
        assert_eq!(record.title("Prices"), "Error: Prices - 2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn stats_count_every_run() {
        let mut stats = ScraperStats::default();
        stats.record_run(fixed_time());
        stats.record_run(fixed_time());
        assert_eq!(stats.total_runs, 2);
        assert_eq!(stats.last_run.as_deref(), Some("2024-05-01T12:00:00.000Z"));
    }
}
