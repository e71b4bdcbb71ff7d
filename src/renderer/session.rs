//! One isolated browser process per render

use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetDeviceMetricsOverrideParams, SetUserAgentOverrideParams,
};
use chromiumoxide::page::Page;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use super::browser_setup::launch_browser;
use super::network_idle::{subscribe, wait_for_network_idle};
use super::profile::BrowserProfile;
use crate::config::ScraperConfig;
use crate::error::ScrapeError;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Browser process, its CDP handler task and its private profile directory.
///
/// Release with [`RenderSession::close`]. Dropping an unclosed session kills
/// the process and removes the profile as a fallback.
pub struct RenderSession {
    browser: Option<Browser>,
    handler: JoinHandle<()>,
    profile: BrowserProfile,
}

impl RenderSession {
    /// Create a fresh profile and launch a browser on it.
    ///
    /// CDP commands may run for at least `attempt_timeout`.
    pub async fn launch(
        config: &ScraperConfig,
        attempt_timeout: Duration,
    ) -> Result<Self, ScrapeError> {
        let profile = BrowserProfile::create(config.profile_root().map(|p| p.as_path()))
            .map_err(|e| render_error("Failed to create browser profile", &e))?;
        let profile_dir = profile
            .path()
            .ok_or_else(|| ScrapeError::Render("Browser profile vanished before launch".into()))?
            .to_path_buf();

        // `profile` drops (and is removed) if launch fails
        let (browser, handler) = launch_browser(config, &profile_dir, attempt_timeout)
            .await
            .map_err(|e| render_error("Failed to launch browser", &e))?;

        info!("Browser session started on {}", profile_dir.display());
        Ok(Self {
            browser: Some(browser),
            handler,
            profile,
        })
    }

    /// Navigate to `url`, wait for the page to settle and serialize the DOM.
    ///
    /// Navigation plus network idle share `timeout`. The settle delay and the
    /// best-effort ready-selector wait come on top of it.
    pub async fn render(
        &self,
        url: &Url,
        timeout: Duration,
        config: &ScraperConfig,
    ) -> Result<String, ScrapeError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| ScrapeError::Render("Browser session already closed".into()))?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Render(format!("Failed to open page: {e}")))?;

        let result = render_page(&page, url, timeout, config).await;

        if let Err(e) = page.close().await {
            debug!("Failed to close page for {url}: {e}");
        }
        result
    }

    /// Close the browser, wait for the process to exit, then remove the profile
    pub async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser: {e}");
            }
            if let Err(e) = browser.wait().await {
                warn!("Failed to wait for browser exit: {e}");
            }
        }
        self.handler.abort();
        self.profile.remove();
        debug!("Browser session released");
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        self.handler.abort();
        if self.browser.take().is_some() {
            // Browser's own Drop kills the child process
            warn!("RenderSession dropped without close(), killing browser");
        }
    }
}

/// Navigate, wait for the network to go quiet and capture the DOM
async fn render_page(
    page: &Page,
    url: &Url,
    timeout: Duration,
    config: &ScraperConfig,
) -> Result<String, ScrapeError> {
    prepare_page(page, config).await?;

    let mut network = subscribe(page)
        .await
        .map_err(|e| ScrapeError::Render(format!("Failed to observe network for {url}: {e}")))?;

    let deadline = Instant::now() + timeout;

    with_deadline(deadline, timeout, url, "Navigation", async {
        page.goto(url.as_str())
            .await
            .map_err(|e| ScrapeError::Render(format!("Navigation to {url} failed: {e}")))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| ScrapeError::Render(format!("Navigation to {url} failed: {e}")))?;
        Ok(())
    })
    .await?;

    with_deadline(deadline, timeout, url, "Network idle wait", async {
        wait_for_network_idle(&mut network, config.network_idle_window()).await;
        Ok(())
    })
    .await?;

    let settle = config.settle_delay();
    if !settle.is_zero() {
        debug!("Settling {}ms for late DOM insertions", settle.as_millis());
        tokio::time::sleep(settle).await;
    }

    if let Some(selector) = config.ready_selector()
        && !wait_for_ready_selector(page, selector, config.ready_timeout()).await
    {
        warn!(
            "Ready selector '{selector}' not found on {url} within {}ms, capturing anyway",
            config.ready_timeout().as_millis()
        );
    }

    let markup = page
        .content()
        .await
        .map_err(|e| ScrapeError::Render(format!("Failed to capture markup from {url}: {e}")))?;

    debug!("Captured {} bytes of rendered markup from {url}", markup.len());
    Ok(markup)
}

/// Viewport and identity overrides applied before navigation
async fn prepare_page(page: &Page, config: &ScraperConfig) -> Result<(), ScrapeError> {
    let (width, height) = config.viewport();

    let metrics = SetDeviceMetricsOverrideParams::builder()
        .width(i64::from(width))
        .height(i64::from(height))
        .device_scale_factor(1.0)
        .mobile(false)
        .build()
        .map_err(|e| ScrapeError::Render(format!("Invalid viewport override: {e}")))?;
    page.execute(metrics)
        .await
        .map_err(|e| ScrapeError::Render(format!("Failed to set viewport: {e}")))?;

    let identity = SetUserAgentOverrideParams::builder()
        .user_agent(config.user_agent())
        .accept_language(config.accept_language())
        .build()
        .map_err(|e| ScrapeError::Render(format!("Invalid user agent override: {e}")))?;
    page.execute(identity)
        .await
        .map_err(|e| ScrapeError::Render(format!("Failed to set user agent: {e}")))?;

    Ok(())
}

/// Poll for `selector` until found or `timeout` elapses
async fn wait_for_ready_selector(page: &Page, selector: &str, timeout: Duration) -> bool {
    poll_until(move || async move { page.find_element(selector).await.is_ok() }, timeout).await
}

/// Re-run `probe` every poll interval until it reports true. False on timeout.
async fn poll_until<F, Fut>(mut probe: F, timeout: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let poll = async {
        while !probe().await {
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    };
    tokio::time::timeout(timeout, poll).await.is_ok()
}

/// Run `operation` until the shared `deadline`, reporting expiry against `budget`
async fn with_deadline<F, T>(
    deadline: Instant,
    budget: Duration,
    url: &Url,
    operation_name: &str,
    operation: F,
) -> Result<T, ScrapeError>
where
    F: Future<Output = Result<T, ScrapeError>>,
{
    match tokio::time::timeout_at(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Render(format!(
            "{operation_name} for {url} timed out after {}ms",
            budget.as_millis()
        ))),
    }
}

/// Render error carrying only the innermost cause of an anyhow chain
fn render_error(context: &str, err: &anyhow::Error) -> ScrapeError {
    ScrapeError::Render(format!("{context}: {}", err.root_cause()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn url() -> Url {
        Url::parse("https://spa.test/").unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_expiry_is_render_error_naming_budget() {
        let budget = Duration::from_millis(250);
        let deadline = Instant::now() + budget;

        let stalled = async {
            std::future::pending::<()>().await;
            Ok(())
        };
        let result: Result<(), _> =
            with_deadline(deadline, budget, &url(), "Network idle wait", stalled).await;

        match result {
            Err(ScrapeError::Render(message)) => assert_eq!(
                message,
                "Network idle wait for https://spa.test/ timed out after 250ms"
            ),
            other => panic!("expected render timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_passes_inner_result_through() {
        let budget = Duration::from_secs(1);
        let deadline = Instant::now() + budget;

        let ok = with_deadline(deadline, budget, &url(), "Navigation", async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err: Result<(), _> = with_deadline(deadline, budget, &url(), "Navigation", async {
            Err(ScrapeError::Render("Navigation to https://spa.test/ failed: refused".into()))
        })
        .await;
        assert_eq!(
            err.unwrap_err().to_string(),
            "Navigation to https://spa.test/ failed: refused"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shared_deadline_shrinks_later_steps() {
        let budget = Duration::from_millis(500);
        let deadline = Instant::now() + budget;

        with_deadline(deadline, budget, &url(), "Navigation", async {
            tokio::time::sleep(Duration::from_millis(400)).await;
            Ok(())
        })
        .await
        .unwrap();

        let idle = with_deadline(deadline, budget, &url(), "Network idle wait", async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;
        assert!(matches!(idle, Err(ScrapeError::Render(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_ready_element_gives_up_without_error() {
        let attempts = Cell::new(0);
        let found = poll_until(
            || {
                attempts.set(attempts.get() + 1);
                async { false }
            },
            Duration::from_secs(1),
        )
        .await;

        assert!(!found);
        assert!(attempts.get() >= 10);
    }

    #[tokio::test(start_paused = true)]
    async fn ready_element_found_after_a_few_polls() {
        let attempts = Cell::new(0);
        let found = poll_until(
            || {
                attempts.set(attempts.get() + 1);
                let ready = attempts.get() >= 3;
                async move { ready }
            },
            Duration::from_secs(5),
        )
        .await;

        assert!(found);
        assert_eq!(attempts.get(), 3);
    }
}
