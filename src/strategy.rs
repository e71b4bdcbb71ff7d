//! Extraction strategies and the seam both of them implement

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use url::Url;

use crate::error::ScrapeError;

/// Where the markup handed to the extraction algorithm came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Unrendered, server-delivered markup from a plain HTTP GET
    Static,
    /// Post-script DOM serialization from an isolated rendering session
    Dynamic,
}

impl Strategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A way of obtaining markup for a URL within a time bound.
///
/// Implemented by `StaticFetcher` and `DynamicRenderer`. The coordinator is
/// generic over this trait so its fallback decisions can run against
/// in-memory sources.
pub trait MarkupSource: Send + Sync {
    /// Strategy reported in the outcome when this source produced the records
    fn strategy(&self) -> Strategy;

    /// Default time bound when the request does not carry one
    fn default_timeout(&self) -> Duration;

    /// Retrieve markup for `url`, failing after `timeout`
    fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, ScrapeError>> + Send;
}
