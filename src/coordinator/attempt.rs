//! Result of a single strategy attempt

use crate::error::ScrapeError;
use crate::extraction::ScrapedRecord;

/// What one strategy produced. The coordinator branches on this instead of
/// on error propagation.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Markup fetched and at least one record extracted
    Records(Vec<ScrapedRecord>),
    /// Markup fetched and extracted, but zero records
    Empty,
    /// Fetch, render or extraction failed
    Failed(ScrapeError),
}

impl AttemptOutcome {
    #[must_use]
    pub fn from_records(records: Vec<ScrapedRecord>) -> Self {
        if records.is_empty() {
            Self::Empty
        } else {
            Self::Records(records)
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Records(_))
    }
}

impl From<Result<Vec<ScrapedRecord>, ScrapeError>> for AttemptOutcome {
    fn from(result: Result<Vec<ScrapedRecord>, ScrapeError>) -> Self {
        match result {
            Ok(records) => Self::from_records(records),
            Err(e) => Self::Failed(e),
        }
    }
}
