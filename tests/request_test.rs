//! Scrape request construction and validation

use adaptive_scrape::{ScrapeError, ScrapeRequest, validate_selectors};
use std::time::Duration;

#[test]
fn test_builder_requires_url_and_selectors() {
    // Does not compile without both:
    // ScrapeRequest::builder().build();
    // ScrapeRequest::builder().url("https://example.com").build();
    let request = ScrapeRequest::builder()
        .url("https://example.com/list")
        .selectors(validate_selectors(r#"{"title": "h1"}"#).unwrap())
        .build()
        .unwrap();

    assert_eq!(request.url(), "https://example.com/list");
    assert_eq!(request.timeout_ms(), None);
    assert!(!request.force_dynamic());
}

#[test]
fn test_optional_controls_in_any_order() {
    let request = ScrapeRequest::builder()
        .timeout_ms(2_500)
        .url("http://example.com")
        .force_dynamic(true)
        .selectors(validate_selectors("{}").unwrap())
        .build()
        .unwrap();

    assert_eq!(request.timeout(), Some(Duration::from_millis(2_500)));
    assert!(request.force_dynamic());
}

#[test]
fn test_rejects_non_http_and_relative_urls() {
    for url in ["ftp://example.com/file", "/relative/path", "example.com", "not a url", ""] {
        let err = ScrapeRequest::from_raw(url, "{}").unwrap_err();
        assert!(matches!(err, ScrapeError::Validation(_)), "{url} -> {err:?}");
    }
}

#[test]
fn test_rejects_zero_timeout() {
    let err = ScrapeRequest::builder()
        .url("https://example.com")
        .selectors(validate_selectors("{}").unwrap())
        .timeout_ms(0)
        .build()
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Validation(_)));
}

#[test]
fn test_from_raw_propagates_selector_errors() {
    let err = ScrapeRequest::from_raw("https://example.com", "[]").unwrap_err();
    assert_eq!(err.to_string(), "Selectors must be an object, got array");
}

#[test]
fn test_deserializes_boundary_shape() {
    let request: ScrapeRequest = serde_json::from_str(
        r#"{
            "url": "https://example.com",
            "selectors": {"container": ".row", "name": "td.name"},
            "timeoutMs": 15000,
            "forceDynamic": true
        }"#,
    )
    .unwrap();

    assert_eq!(request.selectors().container(), Some(".row"));
    assert_eq!(request.timeout_ms(), Some(15_000));
    assert!(request.force_dynamic());
    assert!(request.validate().is_ok());

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["forceDynamic"], true);
    assert_eq!(json["selectors"]["container"], ".row");
}

#[test]
fn test_deserialized_request_defaults() {
    let request: ScrapeRequest =
        serde_json::from_str(r#"{"url": "https://example.com", "selectors": {}}"#).unwrap();
    assert_eq!(request.timeout_ms(), None);
    assert!(!request.force_dynamic());
}
