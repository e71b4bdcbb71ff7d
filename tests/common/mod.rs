//! Test utilities and helper functions for the adaptive_scrape test suite

use adaptive_scrape::{MarkupSource, ScrapeError, Strategy};
use mockito::{Mock, Server};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Creates a test HTML document with specified body
#[allow(dead_code)]
pub fn create_test_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// Listing page with `count` `.item` cards, each with an `h2` and a `.price`
#[allow(dead_code)]
pub fn create_listing_html(count: usize) -> String {
    let items: String = (1..=count)
        .map(|i| {
            format!(
                r#"<div class="item"><h2>  Product {i}  </h2><span class="price">${i}.99</span></div>"#
            )
        })
        .collect();
    create_test_html("Listing", &items)
}

/// Page whose records only exist after a script runs
#[allow(dead_code)]
pub fn create_script_only_html() -> String {
    create_test_html(
        "App",
        r#"<div id="root"></div><script>document.getElementById('root').innerHTML = '<div class="item"><h2>Late</h2></div>';</script>"#,
    )
}

/// Creates a mock endpoint that returns HTML content
#[allow(dead_code)]
pub async fn create_html_mock(server: &mut Server, path: &str, html: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Helper to create test URLs
#[allow(dead_code)]
pub fn test_url(server: &Server, path: &str) -> String {
    format!("{}{}", server.url(), path)
}

/// In-memory markup source with a scripted response and call accounting.
///
/// Failures become `Fetch` errors for the static strategy and `Render`
/// errors for the dynamic one.
#[derive(Clone)]
#[allow(dead_code)]
pub struct FakeSource {
    strategy: Strategy,
    response: Result<String, String>,
    default_timeout: Duration,
    calls: Arc<AtomicUsize>,
    last_timeout: Arc<Mutex<Option<Duration>>>,
}

#[allow(dead_code)]
impl FakeSource {
    pub fn markup(strategy: Strategy, html: impl Into<String>) -> Self {
        Self::with_response(strategy, Ok(html.into()))
    }

    pub fn failing(strategy: Strategy, message: impl Into<String>) -> Self {
        Self::with_response(strategy, Err(message.into()))
    }

    fn with_response(strategy: Strategy, response: Result<String, String>) -> Self {
        let default_timeout = match strategy {
            Strategy::Static => Duration::from_millis(30_000),
            Strategy::Dynamic => Duration::from_millis(60_000),
        };
        Self {
            strategy,
            response,
            default_timeout,
            calls: Arc::new(AtomicUsize::new(0)),
            last_timeout: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_timeout(&self) -> Option<Duration> {
        *self.last_timeout.lock().unwrap()
    }
}

impl MarkupSource for FakeSource {
    fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    async fn fetch(&self, _url: &Url, timeout: Duration) -> Result<String, ScrapeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_timeout.lock().unwrap() = Some(timeout);
        match &self.response {
            Ok(html) => Ok(html.clone()),
            Err(message) => Err(match self.strategy {
                Strategy::Static => ScrapeError::Fetch(message.clone()),
                Strategy::Dynamic => ScrapeError::Render(message.clone()),
            }),
        }
    }
}
