//! Error taxonomy for scrape invocations
//!
//! Every attempt-level failure carries a single human-readable description.
//! The boundary error `Failed` wraps exactly one of them so the visible message
//! never becomes a stack of nested wrapper messages.

/// Convenience alias for Result with `ScrapeError`
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Error type for scrape operations
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Selector specification or request is malformed. Raised before any I/O.
    #[error("{0}")]
    Validation(String),

    /// Static HTTP attempt failed (connection, timeout, non-success status)
    #[error("{0}")]
    Fetch(String),

    /// Rendering session failed (launch, navigation timeout, markup capture)
    #[error("{0}")]
    Render(String),

    /// Selectors could not be evaluated against the markup
    #[error("{0}")]
    Extraction(String),

    /// Boundary-facing failure after every attempted strategy gave up
    #[error("Failed to scrape {url}: {cause}")]
    Failed {
        url: String,
        /// Innermost cause of the last attempted strategy
        cause: Box<ScrapeError>,
        /// Failure of the first strategy when a fallback happened
        fallback_from: Option<Box<ScrapeError>>,
    },
}

impl ScrapeError {
    /// Wrap an attempt failure into the boundary error for `url`.
    ///
    /// An already-wrapped error is unwrapped first so only the innermost
    /// cause is rendered.
    #[must_use]
    pub fn failed(url: impl Into<String>, cause: ScrapeError) -> Self {
        Self::Failed {
            url: url.into(),
            cause: Box::new(cause.into_root_cause()),
            fallback_from: None,
        }
    }

    /// Like [`ScrapeError::failed`], keeping the first strategy's failure as context
    #[must_use]
    pub fn failed_after_fallback(
        url: impl Into<String>,
        cause: ScrapeError,
        fallback_from: Option<ScrapeError>,
    ) -> Self {
        Self::Failed {
            url: url.into(),
            cause: Box::new(cause.into_root_cause()),
            fallback_from: fallback_from.map(|e| Box::new(e.into_root_cause())),
        }
    }

    /// Whether the coordinator may recover from this error by trying the next strategy
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Render(_) | Self::Extraction(_))
    }

    /// Short machine-readable category name
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Fetch(_) => "fetch",
            Self::Render(_) => "render",
            Self::Extraction(_) => "extraction",
            Self::Failed { .. } => "failed",
        }
    }

    /// The innermost attempt-level error
    #[must_use]
    pub fn root_cause(&self) -> &ScrapeError {
        match self {
            Self::Failed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    /// The first strategy's failure, when the boundary error follows a fallback
    #[must_use]
    pub fn fallback_cause(&self) -> Option<&ScrapeError> {
        match self {
            Self::Failed { fallback_from, .. } => fallback_from.as_deref(),
            _ => None,
        }
    }

    fn into_root_cause(self) -> ScrapeError {
        match self {
            Self::Failed { cause, .. } => cause.into_root_cause(),
            other => other,
        }
    }
}
