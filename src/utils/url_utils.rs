//! URL validation helpers.

use url::Url;

use crate::error::ScrapeError;

/// Check if a URL is a syntactically valid absolute http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    parse_target_url(url).is_ok()
}

/// Parse a scrape target, accepting only absolute `http`/`https` URLs
pub fn parse_target_url(url: &str) -> Result<Url, ScrapeError> {
    if url.trim().is_empty() {
        return Err(ScrapeError::Validation("URL must not be empty".to_string()));
    }

    let parsed = Url::parse(url)
        .map_err(|e| ScrapeError::Validation(format!("Invalid URL '{url}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        "http" | "https" => Err(ScrapeError::Validation(format!(
            "Invalid URL '{url}': no host"
        ))),
        scheme => Err(ScrapeError::Validation(format!(
            "Invalid URL '{url}': unsupported scheme '{scheme}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_http_urls() {
        assert!(is_valid_url("https://example.com/list?page=2"));
        assert!(is_valid_url("http://localhost:8080/"));
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("data:text/html,<h1>x</h1>"));
    }
}
